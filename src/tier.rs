use serde::Serialize;

/// Fixed score bands shown next to every result. Local and deterministic,
/// unlike the fetched motivation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Tier {
    AcademicWizard,
    BrainiacBrilliance,
    GradeGladiator,
    SailingSmooth,
    SteadyStepper,
    RisingPhoenix,
    SilverLining,
    ResilientRock,
    RisingPhoenixRedux,
    Trailblazer,
}

impl Tier {
    /// Scores below 1 (or not finite) have no tier.
    pub fn for_score(score: f64) -> Option<Tier> {
        let tier = match score {
            s if s == 10.0 => Tier::AcademicWizard,
            s if (9.0..10.0).contains(&s) => Tier::BrainiacBrilliance,
            s if (8.0..9.0).contains(&s) => Tier::GradeGladiator,
            s if (7.0..8.0).contains(&s) => Tier::SailingSmooth,
            s if (6.0..7.0).contains(&s) => Tier::SteadyStepper,
            s if (5.0..6.0).contains(&s) => Tier::RisingPhoenix,
            s if (4.0..5.0).contains(&s) => Tier::SilverLining,
            s if (3.0..4.0).contains(&s) => Tier::ResilientRock,
            s if (2.0..3.0).contains(&s) => Tier::RisingPhoenixRedux,
            s if (1.0..2.0).contains(&s) => Tier::Trailblazer,
            _ => return None,
        };
        Some(tier)
    }

    pub fn title(&self) -> &'static str {
        match self {
            Tier::AcademicWizard => "Academic Wizard",
            Tier::BrainiacBrilliance => "Brainiac Brilliance",
            Tier::GradeGladiator => "Grade Gladiator",
            Tier::SailingSmooth => "Sailing Smooth",
            Tier::SteadyStepper => "Steady Stepper",
            Tier::RisingPhoenix => "Rising Phoenix",
            Tier::SilverLining => "Silver Lining",
            Tier::ResilientRock => "Resilient Rock",
            Tier::RisingPhoenixRedux => "Rising Phoenix (Redux)",
            Tier::Trailblazer => "Trailblazer",
        }
    }

    pub fn blurb(&self) -> &'static str {
        match self {
            Tier::AcademicWizard => {
                "You're practically a GPA sorcerer. Keep casting those academic spells!"
            }
            Tier::BrainiacBrilliance => {
                "Your intellect shines brighter than a thousand suns. Keep dazzling!"
            }
            Tier::GradeGladiator => {
                "A warrior in the realm of grades. Keep up the fight, valiant one!"
            }
            Tier::SailingSmooth => {
                "Smooth sailing on the GPA seas. Keep the wind in your academic sails."
            }
            Tier::SteadyStepper => {
                "Treading the academic path with determination. Keep taking confident steps."
            }
            Tier::RisingPhoenix => {
                "Your GPA is on the ascent. Keep the flames of improvement burning bright!"
            }
            Tier::SilverLining => {
                "Finding the positives amidst the academic clouds. Keep seeking that silver lining!"
            }
            Tier::ResilientRock => {
                "Solid as a rock in the face of academic challenges. Keep weathering the storms."
            }
            Tier::RisingPhoenixRedux => {
                "Another chance, another rise. Keep soaring towards academic success."
            }
            Tier::Trailblazer => {
                "Your GPA might be low, but your spirit is high. Keep forging ahead!"
            }
        }
    }
}
