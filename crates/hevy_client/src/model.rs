//! Typed records decoded from Hevy API responses, plus volume aggregates.

use chrono::{DateTime, Utc};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Pounds per kilogram.
pub const KG_TO_LB: f64 = 2.20462262185;

#[derive(Clone, Copy, Debug, Deserialize, Serialize, PartialEq, Eq, JsonSchema)]
#[serde(rename_all = "lowercase")]
pub enum SetType {
    Normal,
    Warmup,
    Dropset,
    Failure,
    #[serde(other)]
    Unknown,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum WeightUnit {
    Kilograms,
    Pounds,
}

/// Reps multiplied by weight, summed over everything below the receiver.
pub trait Volume {
    fn volume_kg(&self) -> f64;
    fn volume_lb(&self) -> f64;

    fn volume(&self, unit: WeightUnit) -> f64 {
        match unit {
            WeightUnit::Kilograms => self.volume_kg(),
            WeightUnit::Pounds => self.volume_lb(),
        }
    }
}

#[derive(Clone, Debug, Deserialize, Serialize, PartialEq, JsonSchema)]
pub struct Workout {
    pub id: Uuid,
    pub title: String,
    pub description: Option<String>,
    pub start_time: DateTime<Utc>,
    pub end_time: DateTime<Utc>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    /// In logged order.
    pub exercises: Vec<Exercise>,
}

#[derive(Clone, Debug, Deserialize, Serialize, PartialEq, JsonSchema)]
pub struct Exercise {
    pub index: u32,
    pub title: String,
    pub notes: Option<String>,
    /// Can be used to look up the exercise template.
    pub exercise_template_id: String,
    /// `None` when the exercise is not part of a superset.
    #[serde(rename = "supersets_id")]
    pub superset_id: Option<u32>,
    pub sets: Vec<Set>,
}

/// A single set. Fields that do not apply to the exercise's activity type are
/// reported as `null` by the API and decode to `None`.
#[derive(Clone, Debug, Deserialize, Serialize, PartialEq, JsonSchema)]
pub struct Set {
    pub index: u32,
    pub set_type: SetType,
    pub weight_kg: Option<f64>,
    pub reps: Option<u32>,
    pub distance_meters: Option<f64>,
    pub duration_seconds: Option<u32>,
    /// Rating of perceived exertion.
    pub rpe: Option<f64>,
}

impl Set {
    /// Weight converted to pounds, rounded to the nearest whole pound.
    pub fn weight_lb(&self) -> f64 {
        (self.weight_kg.unwrap_or(0.0) * KG_TO_LB).round()
    }

    fn reps_f64(&self) -> f64 {
        f64::from(self.reps.unwrap_or(0))
    }
}

impl Volume for Set {
    fn volume_kg(&self) -> f64 {
        self.reps_f64() * self.weight_kg.unwrap_or(0.0)
    }

    fn volume_lb(&self) -> f64 {
        self.reps_f64() * self.weight_lb()
    }
}

impl Volume for Exercise {
    fn volume_kg(&self) -> f64 {
        self.sets.iter().map(Volume::volume_kg).sum()
    }

    fn volume_lb(&self) -> f64 {
        self.sets.iter().map(Volume::volume_lb).sum()
    }
}

impl Volume for Workout {
    fn volume_kg(&self) -> f64 {
        self.exercises.iter().map(Volume::volume_kg).sum()
    }

    fn volume_lb(&self) -> f64 {
        self.exercises.iter().map(Volume::volume_lb).sum()
    }
}

/// A saved workout template that has not been performed.
#[derive(Clone, Debug, Deserialize, Serialize, PartialEq, JsonSchema)]
pub struct Routine {
    pub id: Uuid,
    pub title: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub exercises: Vec<Exercise>,
}

impl Volume for Routine {
    fn volume_kg(&self) -> f64 {
        self.exercises.iter().map(Volume::volume_kg).sum()
    }

    fn volume_lb(&self) -> f64 {
        self.exercises.iter().map(Volume::volume_lb).sum()
    }
}

/// Discriminant of an [`Event`], for counting and filtering without matching.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum EventKind {
    Updated,
    Deleted,
}

/// A change to a workout since some point in time.
#[derive(Clone, Debug, Deserialize, Serialize, PartialEq, JsonSchema)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum Event {
    Updated { workout: Workout },
    Deleted { id: Uuid, deleted_at: DateTime<Utc> },
}

impl Event {
    pub fn kind(&self) -> EventKind {
        match self {
            Event::Updated { .. } => EventKind::Updated,
            Event::Deleted { .. } => EventKind::Deleted,
        }
    }

    /// Id of the workout this event is about.
    pub fn workout_id(&self) -> Uuid {
        match self {
            Event::Updated { workout } => workout.id,
            Event::Deleted { id, .. } => *id,
        }
    }

    pub fn workout(&self) -> Option<&Workout> {
        match self {
            Event::Updated { workout } => Some(workout),
            Event::Deleted { .. } => None,
        }
    }

    pub fn deleted_at(&self) -> Option<DateTime<Utc>> {
        match self {
            Event::Deleted { deleted_at, .. } => Some(*deleted_at),
            Event::Updated { .. } => None,
        }
    }
}
