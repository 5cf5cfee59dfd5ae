use serde::{Deserialize, Serialize};

/// Onboarding stages, in the order an athlete moves through them.
///
/// The set is closed and the transition function is total, so a profile can
/// never sit in a stage the rest of the system does not know about.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OnboardingStage {
    Started,
    Profile,
    Physical,
    HeartRate,
    RunningInfo,
    LabTesting,
    TrainingFreq,
    RaceDetails,
    StrategyPreview,
    StartDate,
    Completed,
}

impl OnboardingStage {
    pub fn parse(s: &str) -> Option<Self> {
        match s.trim() {
            "started" => Some(Self::Started),
            "profile" => Some(Self::Profile),
            "physical" => Some(Self::Physical),
            "heart_rate" => Some(Self::HeartRate),
            "running_info" => Some(Self::RunningInfo),
            "lab_testing" => Some(Self::LabTesting),
            "training_freq" => Some(Self::TrainingFreq),
            "race_details" => Some(Self::RaceDetails),
            "strategy_preview" => Some(Self::StrategyPreview),
            "start_date" => Some(Self::StartDate),
            "completed" => Some(Self::Completed),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Started => "started",
            Self::Profile => "profile",
            Self::Physical => "physical",
            Self::HeartRate => "heart_rate",
            Self::RunningInfo => "running_info",
            Self::LabTesting => "lab_testing",
            Self::TrainingFreq => "training_freq",
            Self::RaceDetails => "race_details",
            Self::StrategyPreview => "strategy_preview",
            Self::StartDate => "start_date",
            Self::Completed => "completed",
        }
    }

    /// The stage that follows this one. `Completed` is absorbing.
    pub fn next(self) -> Self {
        match self {
            Self::Started => Self::Profile,
            Self::Profile => Self::Physical,
            Self::Physical => Self::HeartRate,
            Self::HeartRate => Self::RunningInfo,
            Self::RunningInfo => Self::LabTesting,
            Self::LabTesting => Self::TrainingFreq,
            Self::TrainingFreq => Self::RaceDetails,
            Self::RaceDetails => Self::StrategyPreview,
            Self::StrategyPreview => Self::StartDate,
            Self::StartDate => Self::Completed,
            Self::Completed => Self::Completed,
        }
    }

    pub fn is_completed(&self) -> bool {
        matches!(self, Self::Completed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn walks_the_full_flow_in_order() {
        let mut stage = OnboardingStage::Started;
        let mut visited = vec![stage];
        while !stage.is_completed() {
            stage = stage.next();
            visited.push(stage);
        }
        assert_eq!(visited.len(), 11);
        assert_eq!(visited.first(), Some(&OnboardingStage::Started));
        assert_eq!(visited.last(), Some(&OnboardingStage::Completed));
    }

    #[test]
    fn completed_is_absorbing() {
        assert_eq!(OnboardingStage::Completed.next(), OnboardingStage::Completed);
    }

    #[test]
    fn round_trips_through_text() {
        let stages = [
            OnboardingStage::Started,
            OnboardingStage::HeartRate,
            OnboardingStage::TrainingFreq,
            OnboardingStage::StartDate,
            OnboardingStage::Completed,
        ];
        for stage in stages {
            assert_eq!(OnboardingStage::parse(stage.as_str()), Some(stage));
        }
        assert_eq!(OnboardingStage::parse("garbage"), None);
    }
}
