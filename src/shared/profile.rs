//! Profile types
//!
//! A profile is the extended, public description of a user: headline,
//! skills, work history, schooling and links to social accounts. Clients
//! submit flat JSON bodies; the `validate` methods turn them into the typed
//! values the stores persist.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::shared::error::SharedError;
use crate::shared::validation::{non_empty, parse_date, Checks};

/// Owning user, as embedded in every profile response
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProfileUser {
    pub id: Uuid,
    pub name: String,
    pub avatar: String,
}

/// Links to the user's accounts elsewhere
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SocialLinks {
    pub youtube: Option<String>,
    pub twitter: Option<String>,
    pub facebook: Option<String>,
    pub linkedin: Option<String>,
    pub instagram: Option<String>,
}

/// A job in the user's work history
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Experience {
    pub id: Uuid,
    pub title: String,
    pub company: String,
    pub location: Option<String>,
    pub from: NaiveDate,
    pub to: Option<NaiveDate>,
    pub current: bool,
    pub description: Option<String>,
}

/// A school attended by the user
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Education {
    pub id: Uuid,
    pub school: String,
    pub degree: String,
    pub fieldofstudy: String,
    pub from: NaiveDate,
    pub to: Option<NaiveDate>,
    pub current: bool,
    pub description: Option<String>,
}

/// Full profile as returned by every profile endpoint
///
/// `experience` and `education` are most-recent-first.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Profile {
    pub id: Uuid,
    pub user: ProfileUser,
    pub status: String,
    pub company: Option<String>,
    pub website: Option<String>,
    pub location: Option<String>,
    pub bio: Option<String>,
    pub githubusername: Option<String>,
    pub skills: Vec<String>,
    pub social: SocialLinks,
    pub experience: Vec<Experience>,
    pub education: Vec<Education>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Body of `POST /api/profile`
///
/// Social links arrive flat, next to the other fields. `skills` is a
/// comma-separated string.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ProfileRequest {
    pub status: Option<String>,
    pub skills: Option<String>,
    pub company: Option<String>,
    pub website: Option<String>,
    pub location: Option<String>,
    pub bio: Option<String>,
    pub githubusername: Option<String>,
    pub youtube: Option<String>,
    pub twitter: Option<String>,
    pub facebook: Option<String>,
    pub linkedin: Option<String>,
    pub instagram: Option<String>,
}

/// Validated profile fields, ready to be stored
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProfileFields {
    pub status: String,
    pub company: Option<String>,
    pub website: Option<String>,
    pub location: Option<String>,
    pub bio: Option<String>,
    pub githubusername: Option<String>,
    pub skills: Vec<String>,
    pub social: SocialLinks,
}

impl ProfileRequest {
    pub fn validate(&self) -> Result<ProfileFields, SharedError> {
        Checks::new()
            .require("status", self.status.as_deref(), "Status is required")
            .require("skills", self.skills.as_deref(), "Skills is required")
            .finish()?;

        Ok(ProfileFields {
            status: non_empty(self.status.as_deref()).unwrap_or_default(),
            company: non_empty(self.company.as_deref()),
            website: non_empty(self.website.as_deref()),
            location: non_empty(self.location.as_deref()),
            bio: non_empty(self.bio.as_deref()),
            githubusername: non_empty(self.githubusername.as_deref()),
            skills: parse_skills(self.skills.as_deref().unwrap_or_default()),
            social: SocialLinks {
                youtube: non_empty(self.youtube.as_deref()),
                twitter: non_empty(self.twitter.as_deref()),
                facebook: non_empty(self.facebook.as_deref()),
                linkedin: non_empty(self.linkedin.as_deref()),
                instagram: non_empty(self.instagram.as_deref()),
            },
        })
    }
}

/// Split a comma-separated skill list, trimming entries and dropping empty ones
pub fn parse_skills(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|skill| !skill.is_empty())
        .map(str::to_string)
        .collect()
}

/// Body of `PATCH /api/profile/experience`
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ExperienceRequest {
    pub title: Option<String>,
    pub company: Option<String>,
    pub location: Option<String>,
    pub from: Option<String>,
    pub to: Option<String>,
    pub current: Option<bool>,
    pub description: Option<String>,
}

/// Validated experience entry without an id
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewExperience {
    pub title: String,
    pub company: String,
    pub location: Option<String>,
    pub from: NaiveDate,
    pub to: Option<NaiveDate>,
    pub current: bool,
    pub description: Option<String>,
}

impl ExperienceRequest {
    pub fn validate(&self) -> Result<NewExperience, SharedError> {
        let mut checks = Checks::new();
        checks
            .require("title", self.title.as_deref(), "Title is required")
            .require("company", self.company.as_deref(), "Company is required")
            .require("from", self.from.as_deref(), "From date is required");
        let (from, to) = check_dates(&mut checks, self.from.as_deref(), self.to.as_deref());
        checks.finish()?;

        Ok(NewExperience {
            title: non_empty(self.title.as_deref()).unwrap_or_default(),
            company: non_empty(self.company.as_deref()).unwrap_or_default(),
            location: non_empty(self.location.as_deref()),
            from: from.unwrap_or_default(),
            to,
            current: self.current.unwrap_or(false),
            description: non_empty(self.description.as_deref()),
        })
    }
}

/// Body of `PATCH /api/profile/education`
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct EducationRequest {
    pub school: Option<String>,
    pub degree: Option<String>,
    pub fieldofstudy: Option<String>,
    pub from: Option<String>,
    pub to: Option<String>,
    pub current: Option<bool>,
    pub description: Option<String>,
}

/// Validated education entry without an id
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewEducation {
    pub school: String,
    pub degree: String,
    pub fieldofstudy: String,
    pub from: NaiveDate,
    pub to: Option<NaiveDate>,
    pub current: bool,
    pub description: Option<String>,
}

impl EducationRequest {
    pub fn validate(&self) -> Result<NewEducation, SharedError> {
        let mut checks = Checks::new();
        checks
            .require("school", self.school.as_deref(), "School is required")
            .require("degree", self.degree.as_deref(), "Degree is required")
            .require(
                "fieldofstudy",
                self.fieldofstudy.as_deref(),
                "Field of study is required",
            )
            .require("from", self.from.as_deref(), "From date is required");
        let (from, to) = check_dates(&mut checks, self.from.as_deref(), self.to.as_deref());
        checks.finish()?;

        Ok(NewEducation {
            school: non_empty(self.school.as_deref()).unwrap_or_default(),
            degree: non_empty(self.degree.as_deref()).unwrap_or_default(),
            fieldofstudy: non_empty(self.fieldofstudy.as_deref()).unwrap_or_default(),
            from: from.unwrap_or_default(),
            to,
            current: self.current.unwrap_or(false),
            description: non_empty(self.description.as_deref()),
        })
    }
}

fn check_dates(
    checks: &mut Checks,
    from: Option<&str>,
    to: Option<&str>,
) -> (Option<NaiveDate>, Option<NaiveDate>) {
    let from = match parse_date(from) {
        Ok(date) => date,
        Err(_) => {
            checks.check(false, "from", "From date must be formatted as YYYY-MM-DD");
            None
        }
    };
    let to = match parse_date(to) {
        Ok(date) => date,
        Err(_) => {
            checks.check(false, "to", "To date must be formatted as YYYY-MM-DD");
            None
        }
    };
    if let (Some(from), Some(to)) = (from, to) {
        checks.check(from <= to, "to", "To date cannot be before the from date");
    }
    (from, to)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_parse_skills_trims_and_drops_empty() {
        assert_eq!(
            parse_skills(" Rust,  SQL ,,HTML ,"),
            vec!["Rust".to_string(), "SQL".to_string(), "HTML".to_string()]
        );
        assert!(parse_skills(" , ").is_empty());
    }

    #[test]
    fn test_profile_requires_status_and_skills() {
        let errors = ProfileRequest::default().validate().unwrap_err().field_errors();
        let params: Vec<_> = errors.iter().filter_map(|e| e.param.clone()).collect();
        assert_eq!(params, vec!["status".to_string(), "skills".to_string()]);
        assert_eq!(errors[0].msg, "Status is required");
    }

    #[test]
    fn test_profile_collects_social_links() {
        let request = ProfileRequest {
            status: Some("Developer".into()),
            skills: Some("Rust, Go".into()),
            twitter: Some("https://twitter.com/dev".into()),
            youtube: Some("  ".into()),
            ..Default::default()
        };
        let fields = request.validate().unwrap();
        assert_eq!(fields.status, "Developer");
        assert_eq!(fields.skills, vec!["Rust".to_string(), "Go".to_string()]);
        assert_eq!(
            fields.social,
            SocialLinks {
                twitter: Some("https://twitter.com/dev".into()),
                ..Default::default()
            }
        );
    }

    #[test]
    fn test_experience_validation() {
        let request = ExperienceRequest {
            title: Some("Engineer".into()),
            company: Some("Acme".into()),
            from: Some("2019-06-01".into()),
            current: Some(true),
            ..Default::default()
        };
        let entry = request.validate().unwrap();
        assert_eq!(entry.from, NaiveDate::from_ymd_opt(2019, 6, 1).unwrap());
        assert!(entry.current);
        assert_eq!(entry.to, None);

        let errors = ExperienceRequest::default().validate().unwrap_err().field_errors();
        assert_eq!(errors.len(), 3);
    }

    #[test]
    fn test_experience_rejects_bad_dates() {
        let request = ExperienceRequest {
            title: Some("Engineer".into()),
            company: Some("Acme".into()),
            from: Some("2020-01-01".into()),
            to: Some("2019-01-01".into()),
            ..Default::default()
        };
        let errors = request.validate().unwrap_err().field_errors();
        assert_eq!(errors, vec![crate::shared::FieldError::new(
            "to",
            "To date cannot be before the from date"
        )]);

        let request = ExperienceRequest {
            from: Some("June 2019".into()),
            ..request
        };
        let errors = request.validate().unwrap_err().field_errors();
        assert!(errors.iter().any(|e| e.param.as_deref() == Some("from")));
    }

    #[test]
    fn test_education_validation() {
        let request = EducationRequest {
            school: Some("State University".into()),
            degree: Some("BSc".into()),
            fieldofstudy: Some("Computer Science".into()),
            from: Some("2010-09-01".into()),
            to: Some("2014-06-30".into()),
            ..Default::default()
        };
        let entry = request.validate().unwrap();
        assert_eq!(entry.fieldofstudy, "Computer Science");
        assert!(!entry.current);

        let errors = EducationRequest::default().validate().unwrap_err().field_errors();
        assert_eq!(errors.len(), 4);
    }
}
