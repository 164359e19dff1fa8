//! Exercise catalog and anime character registry
//!
//! Static, immutable data defined at process start. The only operations are
//! exact case-sensitive lookup by id and the themed-workout override: a
//! character with a themed exercise list replaces the default workout in its
//! entirety for that user's session (no partial merge).

use serde::{Deserialize, Serialize};

use crate::intensity::{scale_tiers, ScaleParams};
use crate::progression::Difficulty;

pub const MAIN_WORKOUT_ID: &str = "daily_challenge";

/// ---------------------------------------------------------------------------
/// Intensity Configuration
/// ---------------------------------------------------------------------------

/// How an exercise is measured: rep-based or duration-based.
///
/// A tagged union rather than independently optional reps/sets/duration
/// fields, so "neither reps nor duration" is unrepresentable. Untagged serde
/// keeps the JSON shape the web client rendered ({"reps": .., "sets": ..} or
/// {"duration": "60s"}).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Measure {
    Reps {
        reps: u32,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        sets: Option<u32>,
    },
    Timed {
        /// Duration string of the form `"<seconds>s"`
        duration: String,
    },
}

/// One difficulty tier's parameters for one exercise
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct IntensityConfig {
    #[serde(flatten)]
    pub measure: Measure,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description_suffix: Option<String>,
}

impl IntensityConfig {
    pub fn reps(reps: u32, sets: Option<u32>) -> Self {
        Self {
            measure: Measure::Reps { reps, sets },
            description_suffix: None,
        }
    }

    pub fn timed(duration: &str) -> Self {
        Self {
            measure: Measure::Timed { duration: duration.to_string() },
            description_suffix: None,
        }
    }
}

/// Easy/normal/hard variants of one exercise
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IntensityTiers {
    pub easy: IntensityConfig,
    pub normal: IntensityConfig,
    pub hard: IntensityConfig,
}

impl IntensityTiers {
    pub fn get(&self, difficulty: Difficulty) -> &IntensityConfig {
        match difficulty {
            Difficulty::Easy => &self.easy,
            Difficulty::Normal => &self.normal,
            Difficulty::Hard => &self.hard,
        }
    }
}

/// ---------------------------------------------------------------------------
/// Exercises and Workouts
/// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Exercise {
    pub id: String,
    pub name: String,
    pub description: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub video_tutorial_url: Option<String>,
    pub intensity: IntensityTiers,
}

impl Exercise {
    /// Build an exercise from its normal-mode baseline, deriving the easy and
    /// hard tiers through the scaler
    fn from_baseline(
        id: &str,
        name: &str,
        description: &str,
        video_tutorial_url: Option<&str>,
        baseline: IntensityConfig,
        params: ScaleParams,
    ) -> Self {
        Self {
            id: id.to_string(),
            name: name.to_string(),
            description: description.to_string(),
            video_tutorial_url: video_tutorial_url.map(str::to_string),
            intensity: scale_tiers(&baseline, &params),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Workout {
    pub id: String,
    pub name: String,
    pub exercises: Vec<Exercise>,
}

/// ---------------------------------------------------------------------------
/// Characters
/// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Character {
    pub id: String,
    pub name: String,
    pub image_url: String,
    pub description: String,
    /// Flavor only - never used in XP computation
    pub power_level: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub themed_exercises: Option<Vec<Exercise>>,
}

/// ---------------------------------------------------------------------------
/// Error Handling
/// ---------------------------------------------------------------------------

/// A failed lookup is a data-consistency bug (bad seed data or a stale
/// reference), not a user error, so it surfaces as a typed error instead of a
/// degraded zero intensity.
#[derive(Debug, PartialEq, Eq, thiserror::Error)]
pub enum CatalogError {
    #[error("Unknown exercise id: {0}")]
    UnknownExercise(String),

    #[error("Unknown character id: {0}")]
    UnknownCharacter(String),
}

/// ---------------------------------------------------------------------------
/// Catalog
/// ---------------------------------------------------------------------------

#[derive(Debug, Clone)]
pub struct Catalog {
    main_workout: Workout,
    characters: Vec<Character>,
}

impl Catalog {
    /// The standard AnimeFit roster: six default exercises and six mentors
    pub fn standard() -> Self {
        Self {
            main_workout: Workout {
                id: MAIN_WORKOUT_ID.to_string(),
                name: "Today's Heroic Challenge".to_string(),
                exercises: default_exercises(),
            },
            characters: default_characters(),
        }
    }

    pub fn main_workout(&self) -> &Workout {
        &self.main_workout
    }

    pub fn characters(&self) -> &[Character] {
        &self.characters
    }

    pub fn exercise(&self, id: &str) -> Result<&Exercise, CatalogError> {
        self.main_workout
            .exercises
            .iter()
            .chain(
                self.characters
                    .iter()
                    .filter_map(|c| c.themed_exercises.as_deref())
                    .flatten(),
            )
            .find(|e| e.id == id)
            .ok_or_else(|| CatalogError::UnknownExercise(id.to_string()))
    }

    pub fn character(&self, id: &str) -> Result<&Character, CatalogError> {
        self.characters
            .iter()
            .find(|c| c.id == id)
            .ok_or_else(|| CatalogError::UnknownCharacter(id.to_string()))
    }

    /// Intensity parameters for one exercise at one difficulty
    pub fn intensity_for(
        &self,
        exercise_id: &str,
        difficulty: Difficulty,
    ) -> Result<&IntensityConfig, CatalogError> {
        Ok(self.exercise(exercise_id)?.intensity.get(difficulty))
    }

    /// Resolve the workout for a session: a selected character with themed
    /// exercises replaces the default workout wholesale, otherwise the daily
    /// challenge applies.
    pub fn workout_for_character(
        &self,
        character_id: Option<&str>,
    ) -> Result<Workout, CatalogError> {
        let Some(id) = character_id else {
            return Ok(self.main_workout.clone());
        };
        let character = self.character(id)?;
        match &character.themed_exercises {
            Some(exercises) if !exercises.is_empty() => Ok(Workout {
                id: format!("themed_{}", character.id),
                name: format!("{}'s Training Regime", character.name),
                exercises: exercises.clone(),
            }),
            _ => Ok(self.main_workout.clone()),
        }
    }
}

/// ---------------------------------------------------------------------------
/// Standard Data
/// ---------------------------------------------------------------------------

fn default_exercises() -> Vec<Exercise> {
    vec![
        Exercise::from_baseline(
            "pushups",
            "Saiyan Push-ups",
            "Explosive push-ups to build upper body strength.",
            Some("https://www.youtube.com/embed/IODxDxX7oi4"),
            IntensityConfig::reps(15, Some(3)),
            ScaleParams::default(),
        ),
        Exercise::from_baseline(
            "squats",
            "Ninja Squats",
            "Deep squats for leg power and agility.",
            Some("https://www.youtube.com/embed/aclHkVg7PL8"),
            IntensityConfig::reps(20, Some(3)),
            ScaleParams::default(),
        ),
        Exercise::from_baseline(
            "plank",
            "Titan Plank",
            "Hold a rock-solid plank like a true defender.",
            Some("https://www.youtube.com/embed/ASdvN_XEl_c"),
            IntensityConfig::timed("60s"),
            ScaleParams::default().with_duration_floor(30),
        ),
        Exercise::from_baseline(
            "jumpingjacks",
            "Flash Step Jacks",
            "Rapid jumping jacks for speed and endurance.",
            Some("https://www.youtube.com/embed/c4DAnQ6DtF8"),
            IntensityConfig::timed("120s"),
            ScaleParams::default().with_duration_floor(60),
        ),
        Exercise::from_baseline(
            "burpees",
            "One-Punch Burpees",
            "Full-body explosive movement.",
            Some("https://www.youtube.com/embed/auKl9A2iWcE"),
            IntensityConfig::reps(10, Some(3)),
            ScaleParams::default().with_hard_suffix("(Max Power!)"),
        ),
        Exercise::from_baseline(
            "running",
            "Gear Second Run",
            "High-intensity interval running or focus on proper form.",
            Some("https://www.youtube.com/embed/wRkeBVMQSgg"),
            IntensityConfig::timed("300s"),
            ScaleParams::default().with_duration_floor(120),
        ),
    ]
}

fn default_characters() -> Vec<Character> {
    vec![
        Character {
            id: "goku".to_string(),
            name: "Son Goku".to_string(),
            image_url: "https://static.wikia.nocookie.net/dragonball/images/3/30/Goku_au_Galactic_Patrol.png/revision/latest".to_string(),
            description: "A powerful Saiyan warrior from Earth.".to_string(),
            power_level: 9001,
            themed_exercises: Some(goku_exercises()),
        },
        Character {
            id: "naruto".to_string(),
            name: "Naruto Uzumaki".to_string(),
            image_url: "https://static.wikia.nocookie.net/naruto/images/7/7d/Naruto_Uzumaki_%28Part_II_-_Manual_de_Taijutsu%29.png/revision/latest".to_string(),
            description: "The unpredictable knucklehead ninja of Konoha.".to_string(),
            power_level: 7000,
            themed_exercises: None,
        },
        Character {
            id: "luffy".to_string(),
            name: "Monkey D. Luffy".to_string(),
            image_url: "https://static.wikia.nocookie.net/onepiece/images/a/af/Monkey_D._Luffy_Anime_Post_Timeskip_Infobox.png/revision/latest".to_string(),
            description: "Captain of the Straw Hat Pirates, aiming to be Pirate King.".to_string(),
            power_level: 8000,
            themed_exercises: None,
        },
        Character {
            id: "saitama".to_string(),
            name: "Saitama".to_string(),
            image_url: "https://static.wikia.nocookie.net/onepunchman/images/7/7d/Saitama_serious_profile.png/revision/latest".to_string(),
            description: "A hero for fun, capable of defeating any enemy with a single punch.".to_string(),
            power_level: 99999,
            themed_exercises: Some(saitama_exercises()),
        },
        Character {
            id: "nezuko".to_string(),
            name: "Nezuko Kamado".to_string(),
            image_url: "https://static.wikia.nocookie.net/kimetsu-no-yaiba/images/4/4c/Nezuko_Kamado_Anime_Profile.png/revision/latest".to_string(),
            description: "A kind girl turned demon, fighting alongside her brother.".to_string(),
            power_level: 6500,
            themed_exercises: None,
        },
        Character {
            id: "levi".to_string(),
            name: "Levi Ackerman".to_string(),
            image_url: "https://static.wikia.nocookie.net/shingekinokyojin/images/b/b1/Levi_Ackermann_%28Anime%29_character_image.png/revision/latest".to_string(),
            description: "Humanity's strongest soldier in the fight against Titans.".to_string(),
            power_level: 8500,
            themed_exercises: None,
        },
    ]
}

fn goku_exercises() -> Vec<Exercise> {
    vec![
        Exercise::from_baseline(
            "kamehameha_squats",
            "Kamehameha Squats",
            "Charge low, release high - squats with an explosive finish.",
            None,
            IntensityConfig::reps(20, Some(4)),
            ScaleParams::default().with_hard_suffix("(Max Power!)"),
        ),
        Exercise::from_baseline(
            "gravity_pushups",
            "Gravity Chamber Push-ups",
            "Push-ups performed as if under 10x gravity.",
            None,
            IntensityConfig::reps(25, Some(3)),
            ScaleParams::default().with_hard_suffix("(Max Power!)"),
        ),
        Exercise::from_baseline(
            "kaioken_sprints",
            "Kaio-ken Sprints",
            "All-out sprint bursts with short recoveries.",
            None,
            IntensityConfig::timed("120s"),
            ScaleParams::default().with_duration_floor(60),
        ),
    ]
}

fn saitama_exercises() -> Vec<Exercise> {
    vec![
        Exercise::from_baseline(
            "hero_pushups",
            "Hero Training Push-ups",
            "The legendary regimen: one hundred push-ups, no air conditioning.",
            None,
            IntensityConfig::reps(100, None),
            ScaleParams::default(),
        ),
        Exercise::from_baseline(
            "hero_squats",
            "Hero Training Squats",
            "One hundred squats, every single day.",
            None,
            IntensityConfig::reps(100, None),
            ScaleParams::default(),
        ),
        Exercise::from_baseline(
            "hero_run",
            "10km Hero Run",
            "The daily run that made the strongest hero.",
            None,
            IntensityConfig::timed("600s"),
            ScaleParams::default().with_duration_floor(600),
        ),
    ]
}

/// ---------------------------------------------------------------------------
/// Tests
/// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_exercise_lookup_exact_match() {
        let catalog = Catalog::standard();
        assert_eq!(catalog.exercise("pushups").unwrap().name, "Saiyan Push-ups");
        assert_eq!(
            catalog.exercise("Pushups"),
            Err(CatalogError::UnknownExercise("Pushups".to_string()))
        );
    }

    #[test]
    fn test_unknown_exercise_fails_fast() {
        let catalog = Catalog::standard();
        let err = catalog.intensity_for("flying", Difficulty::Normal).unwrap_err();
        assert_eq!(err, CatalogError::UnknownExercise("flying".to_string()));
    }

    #[test]
    fn test_lookup_is_idempotent() {
        let catalog = Catalog::standard();
        let first = catalog.intensity_for("plank", Difficulty::Easy).unwrap().clone();
        let second = catalog.intensity_for("plank", Difficulty::Easy).unwrap().clone();
        assert_eq!(first, second);
    }

    #[test]
    fn test_plank_tiers_respect_floor() {
        let catalog = Catalog::standard();
        // 60s * 0.66 = 39.6 -> 40s, above the 30s floor
        let easy = catalog.intensity_for("plank", Difficulty::Easy).unwrap();
        assert_eq!(easy.measure, Measure::Timed { duration: "40s".to_string() });

        let hard = catalog.intensity_for("plank", Difficulty::Hard).unwrap();
        assert_eq!(hard.measure, Measure::Timed { duration: "90s".to_string() });
    }

    #[test]
    fn test_saitama_run_clamps_to_floor() {
        let catalog = Catalog::standard();
        // 600s * 0.66 = 396s, clamped up to the 600s floor
        let easy = catalog.intensity_for("hero_run", Difficulty::Easy).unwrap();
        assert_eq!(easy.measure, Measure::Timed { duration: "600s".to_string() });
    }

    #[test]
    fn test_character_lookup() {
        let catalog = Catalog::standard();
        assert_eq!(catalog.character("levi").unwrap().power_level, 8500);
        assert_eq!(
            catalog.character("vegeta"),
            Err(CatalogError::UnknownCharacter("vegeta".to_string()))
        );
    }

    #[test]
    fn test_themed_workout_replaces_default_entirely() {
        let catalog = Catalog::standard();
        let workout = catalog.workout_for_character(Some("goku")).unwrap();

        assert_eq!(workout.id, "themed_goku");
        assert_eq!(workout.exercises.len(), 3);
        assert!(workout.exercises.iter().all(|e| e.id != "pushups"));
    }

    #[test]
    fn test_character_without_themed_list_uses_default() {
        let catalog = Catalog::standard();
        let workout = catalog.workout_for_character(Some("naruto")).unwrap();
        assert_eq!(workout.id, MAIN_WORKOUT_ID);
        assert_eq!(workout.exercises.len(), 6);
    }

    #[test]
    fn test_no_character_uses_default() {
        let catalog = Catalog::standard();
        let workout = catalog.workout_for_character(None).unwrap();
        assert_eq!(workout.id, MAIN_WORKOUT_ID);
    }

    #[test]
    fn test_intensity_json_shape() {
        let catalog = Catalog::standard();
        let normal = catalog.intensity_for("pushups", Difficulty::Normal).unwrap();
        let json = serde_json::to_value(normal).unwrap();
        assert_eq!(json["reps"], 15);
        assert_eq!(json["sets"], 3);
        assert!(json.get("duration").is_none());

        let timed = catalog.intensity_for("plank", Difficulty::Normal).unwrap();
        let json = serde_json::to_value(timed).unwrap();
        assert_eq!(json["duration"], "60s");
        assert!(json.get("reps").is_none());
    }
}
