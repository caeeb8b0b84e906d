//! `Generation` and `Vote` records.
//!
//! Both types keep their fields private: every value is validated on the way in
//! (constructor or deserialization), and `created_at` has no setter.

use crate::ModelError;
use crate::constants::{IMAGE, TEXT};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::borrow::Borrow;
use std::fmt;
use std::str::FromStr;

macro_rules! record_id {
    ($(#[$meta:meta])* $name:ident, $label:literal) => {
        $(#[$meta])*
        #[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
        #[serde(try_from = "String", into = "String")]
        pub struct $name(String);

        impl $name {
            /// Wraps an opaque identifier.
            ///
            /// # Errors
            /// Returns [`ModelError::InvalidId`] if the identifier is blank.
            pub fn new(id: impl Into<String>) -> Result<Self, ModelError> {
                let id = id.into();
                if id.trim().is_empty() {
                    return Err(ModelError::InvalidId {
                        message: concat!($label, " id cannot be empty").into(),
                        context: None,
                    });
                }
                Ok(Self(id))
            }

            #[must_use]
            pub fn as_str(&self) -> &str {
                &self.0
            }
        }

        impl TryFrom<String> for $name {
            type Error = ModelError;

            fn try_from(id: String) -> Result<Self, Self::Error> {
                Self::new(id)
            }
        }

        impl TryFrom<&str> for $name {
            type Error = ModelError;

            fn try_from(id: &str) -> Result<Self, Self::Error> {
                Self::new(id)
            }
        }

        impl From<$name> for String {
            fn from(id: $name) -> Self {
                id.0
            }
        }

        impl AsRef<str> for $name {
            fn as_ref(&self) -> &str {
                &self.0
            }
        }

        impl Borrow<str> for $name {
            fn borrow(&self) -> &str {
                &self.0
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(&self.0)
            }
        }
    };
}

record_id!(
    /// Identifier of a [`Generation`], unique within the store that holds it.
    GenerationId,
    "Generation"
);

record_id!(
    /// Identifier of a [`Vote`] event.
    VoteId,
    "Vote"
);

/// Discriminator deciding how a generation's `content` is interpreted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum GenerationKind {
    /// `content` references image data (URL, data URI or absolute path).
    Image,
    /// `content` is the inline text itself.
    Text,
}

impl GenerationKind {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Image => IMAGE,
            Self::Text => TEXT,
        }
    }

    /// Checks that `content` is a valid payload for this kind.
    ///
    /// # Errors
    /// Returns [`ModelError::InvalidPayload`] for blank text or an image that is
    /// not a URL, `data:image/` URI or absolute path.
    pub fn validate_content(self, content: &str) -> Result<(), ModelError> {
        let valid = match self {
            Self::Text => !content.trim().is_empty(),
            Self::Image => {
                !content.chars().any(char::is_whitespace)
                    && ["http://", "https://", "data:image/", "/"]
                        .iter()
                        .any(|prefix| content.len() > prefix.len() && content.starts_with(prefix))
            },
        };

        if valid {
            Ok(())
        } else {
            Err(ModelError::InvalidPayload {
                message: format!("content is not a valid {self} payload").into(),
                context: None,
            })
        }
    }
}

impl fmt::Display for GenerationKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for GenerationKind {
    type Err = ModelError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            IMAGE => Ok(Self::Image),
            TEXT => Ok(Self::Text),
            other => Err(ModelError::InvalidKind {
                message: format!("expected `{IMAGE}` or `{TEXT}`, got `{other}`").into(),
                context: None,
            }),
        }
    }
}

/// One generated artifact competing in the ranking pool.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "GenerationRecord")]
pub struct Generation {
    id: GenerationId,
    content: String,
    #[serde(rename = "type")]
    kind: GenerationKind,
    elo_rating: f64,
    created_at: DateTime<Utc>,
}

#[derive(Deserialize)]
struct GenerationRecord {
    id: GenerationId,
    content: String,
    #[serde(rename = "type")]
    kind: GenerationKind,
    elo_rating: f64,
    created_at: DateTime<Utc>,
}

impl TryFrom<GenerationRecord> for Generation {
    type Error = ModelError;

    fn try_from(r: GenerationRecord) -> Result<Self, Self::Error> {
        Self::new(r.id, r.kind, r.content, r.elo_rating, r.created_at)
    }
}

impl Generation {
    /// Builds a generation, validating its payload and rating.
    ///
    /// # Errors
    /// Returns [`ModelError::InvalidPayload`] if `content` does not fit `kind`, or
    /// [`ModelError::InvalidRating`] if `elo_rating` is not finite.
    pub fn new(
        id: GenerationId,
        kind: GenerationKind,
        content: impl Into<String>,
        elo_rating: f64,
        created_at: DateTime<Utc>,
    ) -> Result<Self, ModelError> {
        let content = content.into();
        kind.validate_content(&content)?;
        check_rating(elo_rating)?;

        Ok(Self { id, content, kind, elo_rating, created_at })
    }

    #[must_use]
    pub const fn id(&self) -> &GenerationId {
        &self.id
    }

    #[must_use]
    pub fn content(&self) -> &str {
        &self.content
    }

    #[must_use]
    pub const fn kind(&self) -> GenerationKind {
        self.kind
    }

    #[must_use]
    pub const fn elo_rating(&self) -> f64 {
        self.elo_rating
    }

    #[must_use]
    pub const fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    /// Replaces the rating and returns the previous one.
    ///
    /// # Errors
    /// Returns [`ModelError::InvalidRating`] if `rating` is not finite; the
    /// current rating is left untouched.
    pub fn apply_rating(&mut self, rating: f64) -> Result<f64, ModelError> {
        check_rating(rating)?;
        Ok(std::mem::replace(&mut self.elo_rating, rating))
    }
}

fn check_rating(rating: f64) -> Result<(), ModelError> {
    if rating.is_finite() {
        Ok(())
    } else {
        Err(ModelError::InvalidRating {
            message: format!("rating must be finite, got {rating}").into(),
            context: None,
        })
    }
}

/// Outcome of one pairwise comparison. `winner_id` and `loser_id` are weak
/// references: they name generations, they do not own them.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "VoteRecord")]
pub struct Vote {
    id: VoteId,
    winner_id: GenerationId,
    loser_id: GenerationId,
    created_at: DateTime<Utc>,
}

#[derive(Deserialize)]
struct VoteRecord {
    id: VoteId,
    winner_id: GenerationId,
    loser_id: GenerationId,
    created_at: DateTime<Utc>,
}

impl TryFrom<VoteRecord> for Vote {
    type Error = ModelError;

    fn try_from(r: VoteRecord) -> Result<Self, Self::Error> {
        Self::new(r.id, r.winner_id, r.loser_id, r.created_at)
    }
}

impl Vote {
    /// Builds a vote between two distinct generations.
    ///
    /// # Errors
    /// Returns [`ModelError::SelfVote`] if `winner_id == loser_id`.
    pub fn new(
        id: VoteId,
        winner_id: GenerationId,
        loser_id: GenerationId,
        created_at: DateTime<Utc>,
    ) -> Result<Self, ModelError> {
        if winner_id == loser_id {
            return Err(ModelError::SelfVote {
                message: format!("generation `{winner_id}` cannot be voted against itself").into(),
                context: None,
            });
        }

        Ok(Self { id, winner_id, loser_id, created_at })
    }

    #[must_use]
    pub const fn id(&self) -> &VoteId {
        &self.id
    }

    #[must_use]
    pub const fn winner_id(&self) -> &GenerationId {
        &self.winner_id
    }

    #[must_use]
    pub const fn loser_id(&self) -> &GenerationId {
        &self.loser_id
    }

    #[must_use]
    pub const fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    #[must_use]
    pub fn involves(&self, id: &GenerationId) -> bool {
        &self.winner_id == id || &self.loser_id == id
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn image_payloads_must_be_references() {
        let kind = GenerationKind::Image;
        assert!(kind.validate_content("https://cdn.example.com/a.png").is_ok());
        assert!(kind.validate_content("data:image/png;base64,AAAA").is_ok());
        assert!(kind.validate_content("/storage/a.png").is_ok());

        assert!(kind.validate_content("a sunset over the sea").is_err());
        assert!(kind.validate_content("https://").is_err());
        assert!(kind.validate_content("").is_err());
    }

    #[test]
    fn text_payloads_must_not_be_blank() {
        assert!(GenerationKind::Text.validate_content("a haiku").is_ok());
        assert!(GenerationKind::Text.validate_content("  \n ").is_err());
    }

    #[test]
    fn blank_ids_are_rejected() {
        assert!(GenerationId::new("").is_err());
        assert!(VoteId::new("   ").is_err());
        assert_eq!(GenerationId::new("g1").map(String::from).ok().as_deref(), Some("g1"));
    }
}
