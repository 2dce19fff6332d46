//! Database operations for profiles
//!
//! A profile row holds the scalar fields, the skill list (JSON text) and the
//! social links. Experience and education entries live in child tables and
//! are read back newest first by insertion sequence.

use std::collections::HashMap;

use chrono::{DateTime, NaiveDate, Utc};
use sqlx::{types::Json, SqlitePool};
use uuid::Uuid;

use crate::shared::profile::{
    Education, Experience, NewEducation, NewExperience, Profile, ProfileFields, ProfileUser,
    SocialLinks,
};

const PROFILE_SELECT: &str = r#"
    SELECT p.id, p.user_id, u.name AS user_name, u.avatar AS user_avatar,
           p.status, p.company, p.website, p.location, p.bio, p.githubusername, p.skills,
           p.youtube, p.twitter, p.facebook, p.linkedin, p.instagram,
           p.created_at, p.updated_at
    FROM profiles p
    JOIN users u ON u.id = p.user_id
"#;

#[derive(sqlx::FromRow)]
struct ProfileRow {
    id: Uuid,
    user_id: Uuid,
    user_name: String,
    user_avatar: String,
    status: String,
    company: Option<String>,
    website: Option<String>,
    location: Option<String>,
    bio: Option<String>,
    githubusername: Option<String>,
    skills: Json<Vec<String>>,
    youtube: Option<String>,
    twitter: Option<String>,
    facebook: Option<String>,
    linkedin: Option<String>,
    instagram: Option<String>,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

const EXPERIENCE_SELECT: &str = r#"
    SELECT id, profile_id, title, company, location, from_date, to_date, current, description
    FROM profile_experience
"#;

const EDUCATION_SELECT: &str = r#"
    SELECT id, profile_id, school, degree, fieldofstudy, from_date, to_date, current, description
    FROM profile_education
"#;

#[derive(sqlx::FromRow)]
struct ExperienceRow {
    id: Uuid,
    profile_id: Uuid,
    title: String,
    company: String,
    location: Option<String>,
    from_date: NaiveDate,
    to_date: Option<NaiveDate>,
    current: bool,
    description: Option<String>,
}

impl From<ExperienceRow> for Experience {
    fn from(row: ExperienceRow) -> Self {
        Self {
            id: row.id,
            title: row.title,
            company: row.company,
            location: row.location,
            from: row.from_date,
            to: row.to_date,
            current: row.current,
            description: row.description,
        }
    }
}

#[derive(sqlx::FromRow)]
struct EducationRow {
    id: Uuid,
    profile_id: Uuid,
    school: String,
    degree: String,
    fieldofstudy: String,
    from_date: NaiveDate,
    to_date: Option<NaiveDate>,
    current: bool,
    description: Option<String>,
}

impl From<EducationRow> for Education {
    fn from(row: EducationRow) -> Self {
        Self {
            id: row.id,
            school: row.school,
            degree: row.degree,
            fieldofstudy: row.fieldofstudy,
            from: row.from_date,
            to: row.to_date,
            current: row.current,
            description: row.description,
        }
    }
}

fn assemble(row: ProfileRow, experience: Vec<Experience>, education: Vec<Education>) -> Profile {
    Profile {
        id: row.id,
        user: ProfileUser {
            id: row.user_id,
            name: row.user_name,
            avatar: row.user_avatar,
        },
        status: row.status,
        company: row.company,
        website: row.website,
        location: row.location,
        bio: row.bio,
        githubusername: row.githubusername,
        skills: row.skills.0,
        social: SocialLinks {
            youtube: row.youtube,
            twitter: row.twitter,
            facebook: row.facebook,
            linkedin: row.linkedin,
            instagram: row.instagram,
        },
        experience,
        education,
        created_at: row.created_at,
        updated_at: row.updated_at,
    }
}

/// Attach experience and education entries to a profile row
async fn hydrate(pool: &SqlitePool, row: ProfileRow) -> Result<Profile, sqlx::Error> {
    let experience = sqlx::query_as::<_, ExperienceRow>(&format!(
        "{EXPERIENCE_SELECT} WHERE profile_id = ? ORDER BY seq DESC"
    ))
    .bind(row.id)
    .fetch_all(pool)
    .await?;

    let education = sqlx::query_as::<_, EducationRow>(&format!(
        "{EDUCATION_SELECT} WHERE profile_id = ? ORDER BY seq DESC"
    ))
    .bind(row.id)
    .fetch_all(pool)
    .await?;

    Ok(assemble(
        row,
        experience.into_iter().map(Experience::from).collect(),
        education.into_iter().map(Education::from).collect(),
    ))
}

/// Get the profile owned by a user
///
/// # Returns
/// Profile with its owner's name and avatar, or None if the user has none
pub async fn get_profile_by_user(pool: &SqlitePool, user_id: Uuid) -> Result<Option<Profile>, sqlx::Error> {
    let row = sqlx::query_as::<_, ProfileRow>(&format!("{PROFILE_SELECT} WHERE p.user_id = ?"))
        .bind(user_id)
        .fetch_optional(pool)
        .await?;

    match row {
        Some(row) => Ok(Some(hydrate(pool, row).await?)),
        None => Ok(None),
    }
}

/// Get every profile, oldest first
pub async fn list_profiles(pool: &SqlitePool) -> Result<Vec<Profile>, sqlx::Error> {
    let rows = sqlx::query_as::<_, ProfileRow>(&format!("{PROFILE_SELECT} ORDER BY p.created_at ASC"))
        .fetch_all(pool)
        .await?;

    // Entries of every profile in one query per table, grouped by profile
    let mut experience: HashMap<Uuid, Vec<Experience>> = HashMap::new();
    for entry in sqlx::query_as::<_, ExperienceRow>(&format!("{EXPERIENCE_SELECT} ORDER BY seq DESC"))
        .fetch_all(pool)
        .await?
    {
        experience.entry(entry.profile_id).or_default().push(entry.into());
    }

    let mut education: HashMap<Uuid, Vec<Education>> = HashMap::new();
    for entry in sqlx::query_as::<_, EducationRow>(&format!("{EDUCATION_SELECT} ORDER BY seq DESC"))
        .fetch_all(pool)
        .await?
    {
        education.entry(entry.profile_id).or_default().push(entry.into());
    }

    Ok(rows
        .into_iter()
        .map(|row| {
            let entries = experience.remove(&row.id).unwrap_or_default();
            let schools = education.remove(&row.id).unwrap_or_default();
            assemble(row, entries, schools)
        })
        .collect())
}

/// Id of the profile owned by a user
pub async fn get_profile_id(pool: &SqlitePool, user_id: Uuid) -> Result<Option<Uuid>, sqlx::Error> {
    sqlx::query_scalar::<_, Uuid>("SELECT id FROM profiles WHERE user_id = ?")
        .bind(user_id)
        .fetch_optional(pool)
        .await
}

/// Create the user's profile, or replace its fields if it exists
///
/// Experience and education entries are left untouched on update.
///
/// # Returns
/// The stored profile and whether it was newly created
pub async fn upsert_profile(
    pool: &SqlitePool,
    user_id: Uuid,
    fields: &ProfileFields,
) -> Result<(Profile, bool), sqlx::Error> {
    let new_id = Uuid::new_v4();
    let now = Utc::now();

    let id = sqlx::query_scalar::<_, Uuid>(
        r#"
        INSERT INTO profiles (
            id, user_id, status, company, website, location, bio, githubusername, skills,
            youtube, twitter, facebook, linkedin, instagram, created_at, updated_at
        )
        VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?)
        ON CONFLICT (user_id) DO UPDATE SET
            status = excluded.status,
            company = excluded.company,
            website = excluded.website,
            location = excluded.location,
            bio = excluded.bio,
            githubusername = excluded.githubusername,
            skills = excluded.skills,
            youtube = excluded.youtube,
            twitter = excluded.twitter,
            facebook = excluded.facebook,
            linkedin = excluded.linkedin,
            instagram = excluded.instagram,
            updated_at = excluded.updated_at
        RETURNING id
        "#,
    )
    .bind(new_id)
    .bind(user_id)
    .bind(&fields.status)
    .bind(&fields.company)
    .bind(&fields.website)
    .bind(&fields.location)
    .bind(&fields.bio)
    .bind(&fields.githubusername)
    .bind(Json(&fields.skills))
    .bind(&fields.social.youtube)
    .bind(&fields.social.twitter)
    .bind(&fields.social.facebook)
    .bind(&fields.social.linkedin)
    .bind(&fields.social.instagram)
    .bind(now)
    .bind(now)
    .fetch_one(pool)
    .await?;

    let profile = get_profile_by_user(pool, user_id)
        .await?
        .ok_or(sqlx::Error::RowNotFound)?;

    Ok((profile, id == new_id))
}

/// Prepend an experience entry
pub async fn add_experience(
    pool: &SqlitePool,
    profile_id: Uuid,
    entry: &NewExperience,
) -> Result<Uuid, sqlx::Error> {
    let id = Uuid::new_v4();

    sqlx::query(
        r#"
        INSERT INTO profile_experience (id, profile_id, title, company, location, from_date, to_date, current, description)
        VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?)
        "#,
    )
    .bind(id)
    .bind(profile_id)
    .bind(&entry.title)
    .bind(&entry.company)
    .bind(&entry.location)
    .bind(entry.from)
    .bind(entry.to)
    .bind(entry.current)
    .bind(&entry.description)
    .execute(pool)
    .await?;

    Ok(id)
}

/// Remove one experience entry of a profile
///
/// # Returns
/// `true` if the entry existed
pub async fn remove_experience(pool: &SqlitePool, profile_id: Uuid, entry_id: Uuid) -> Result<bool, sqlx::Error> {
    let result = sqlx::query("DELETE FROM profile_experience WHERE id = ? AND profile_id = ?")
        .bind(entry_id)
        .bind(profile_id)
        .execute(pool)
        .await?;

    Ok(result.rows_affected() > 0)
}

/// Prepend an education entry
pub async fn add_education(
    pool: &SqlitePool,
    profile_id: Uuid,
    entry: &NewEducation,
) -> Result<Uuid, sqlx::Error> {
    let id = Uuid::new_v4();

    sqlx::query(
        r#"
        INSERT INTO profile_education (id, profile_id, school, degree, fieldofstudy, from_date, to_date, current, description)
        VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?)
        "#,
    )
    .bind(id)
    .bind(profile_id)
    .bind(&entry.school)
    .bind(&entry.degree)
    .bind(&entry.fieldofstudy)
    .bind(entry.from)
    .bind(entry.to)
    .bind(entry.current)
    .bind(&entry.description)
    .execute(pool)
    .await?;

    Ok(id)
}

/// Remove one education entry of a profile
///
/// # Returns
/// `true` if the entry existed
pub async fn remove_education(pool: &SqlitePool, profile_id: Uuid, entry_id: Uuid) -> Result<bool, sqlx::Error> {
    let result = sqlx::query("DELETE FROM profile_education WHERE id = ? AND profile_id = ?")
        .bind(entry_id)
        .bind(profile_id)
        .execute(pool)
        .await?;

    Ok(result.rows_affected() > 0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::backend::auth::users::{create_user, delete_user, User};
    use crate::backend::server::config::connect_database;
    use pretty_assertions::assert_eq;

    async fn setup() -> (SqlitePool, User) {
        let pool = connect_database("sqlite::memory:", 1).await.unwrap();
        let user = create_user(&pool, "A", "a@x.com", "hash", "https://avatar/a")
            .await
            .unwrap();
        (pool, user)
    }

    fn fields(status: &str, skills: &[&str]) -> ProfileFields {
        ProfileFields {
            status: status.to_string(),
            company: Some("Acme".to_string()),
            website: None,
            location: None,
            bio: None,
            githubusername: None,
            skills: skills.iter().map(|s| s.to_string()).collect(),
            social: SocialLinks {
                twitter: Some("https://twitter.com/a".to_string()),
                ..SocialLinks::default()
            },
        }
    }

    fn experience(title: &str) -> NewExperience {
        NewExperience {
            title: title.to_string(),
            company: "Acme".to_string(),
            location: None,
            from: NaiveDate::from_ymd_opt(2020, 1, 1).unwrap(),
            to: None,
            current: true,
            description: None,
        }
    }

    #[tokio::test]
    async fn test_upsert_creates_then_updates() {
        let (pool, user) = setup().await;

        let (created, was_created) = upsert_profile(&pool, user.id, &fields("Developer", &["rust"]))
            .await
            .unwrap();
        assert!(was_created);
        assert_eq!(created.user.name, "A");
        assert_eq!(created.skills, vec!["rust".to_string()]);
        assert_eq!(created.social.twitter.as_deref(), Some("https://twitter.com/a"));

        let (updated, was_created) = upsert_profile(&pool, user.id, &fields("Senior", &["rust", "sql"]))
            .await
            .unwrap();
        assert!(!was_created);
        assert_eq!(updated.id, created.id);
        assert_eq!(updated.status, "Senior");
        assert_eq!(updated.skills, vec!["rust".to_string(), "sql".to_string()]);
        assert_eq!(list_profiles(&pool).await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_update_keeps_experience() {
        let (pool, user) = setup().await;
        let (profile, _) = upsert_profile(&pool, user.id, &fields("Developer", &["rust"]))
            .await
            .unwrap();
        add_experience(&pool, profile.id, &experience("Engineer")).await.unwrap();

        let (updated, _) = upsert_profile(&pool, user.id, &fields("Senior", &["rust"]))
            .await
            .unwrap();
        assert_eq!(updated.experience.len(), 1);
        assert_eq!(updated.experience[0].title, "Engineer");
    }

    #[tokio::test]
    async fn test_entries_newest_first_and_removal_keeps_order() {
        let (pool, user) = setup().await;
        let (profile, _) = upsert_profile(&pool, user.id, &fields("Developer", &["rust"]))
            .await
            .unwrap();

        let first = add_experience(&pool, profile.id, &experience("First")).await.unwrap();
        let second = add_experience(&pool, profile.id, &experience("Second")).await.unwrap();
        let third = add_experience(&pool, profile.id, &experience("Third")).await.unwrap();

        let loaded = get_profile_by_user(&pool, user.id).await.unwrap().unwrap();
        let ids: Vec<Uuid> = loaded.experience.iter().map(|e| e.id).collect();
        assert_eq!(ids, vec![third, second, first]);

        assert!(remove_experience(&pool, profile.id, second).await.unwrap());
        assert!(!remove_experience(&pool, profile.id, second).await.unwrap());

        let loaded = get_profile_by_user(&pool, user.id).await.unwrap().unwrap();
        let ids: Vec<Uuid> = loaded.experience.iter().map(|e| e.id).collect();
        assert_eq!(ids, vec![third, first]);
    }

    #[tokio::test]
    async fn test_education_entries() {
        let (pool, user) = setup().await;
        let (profile, _) = upsert_profile(&pool, user.id, &fields("Developer", &["rust"]))
            .await
            .unwrap();

        let entry = NewEducation {
            school: "MIT".to_string(),
            degree: "BSc".to_string(),
            fieldofstudy: "CS".to_string(),
            from: NaiveDate::from_ymd_opt(2010, 9, 1).unwrap(),
            to: NaiveDate::from_ymd_opt(2014, 6, 1),
            current: false,
            description: Some("Systems".to_string()),
        };
        let id = add_education(&pool, profile.id, &entry).await.unwrap();

        let loaded = get_profile_by_user(&pool, user.id).await.unwrap().unwrap();
        assert_eq!(loaded.education.len(), 1);
        assert_eq!(loaded.education[0].id, id);
        assert_eq!(loaded.education[0].to, NaiveDate::from_ymd_opt(2014, 6, 1));

        assert!(remove_education(&pool, profile.id, id).await.unwrap());
        let loaded = get_profile_by_user(&pool, user.id).await.unwrap().unwrap();
        assert!(loaded.education.is_empty());
    }

    #[tokio::test]
    async fn test_list_profiles_keeps_entries_with_their_profile() {
        let (pool, alice) = setup().await;
        let bob = create_user(&pool, "B", "b@x.com", "hash", "https://avatar/b")
            .await
            .unwrap();
        let (alice_profile, _) = upsert_profile(&pool, alice.id, &fields("Developer", &["rust"]))
            .await
            .unwrap();
        let (bob_profile, _) = upsert_profile(&pool, bob.id, &fields("Designer", &["css"]))
            .await
            .unwrap();

        let a1 = add_experience(&pool, alice_profile.id, &experience("A1")).await.unwrap();
        let b1 = add_experience(&pool, bob_profile.id, &experience("B1")).await.unwrap();
        let a2 = add_experience(&pool, alice_profile.id, &experience("A2")).await.unwrap();

        let profiles = list_profiles(&pool).await.unwrap();
        assert_eq!(profiles.len(), 2);
        let listed = |user_id: Uuid| {
            profiles
                .iter()
                .find(|p| p.user.id == user_id)
                .map(|p| p.experience.iter().map(|e| e.id).collect::<Vec<_>>())
                .unwrap()
        };
        assert_eq!(listed(alice.id), vec![a2, a1]);
        assert_eq!(listed(bob.id), vec![b1]);

        let single = get_profile_by_user(&pool, alice.id).await.unwrap().unwrap();
        let single_ids: Vec<Uuid> = single.experience.iter().map(|e| e.id).collect();
        assert_eq!(single_ids, listed(alice.id));
    }

    #[tokio::test]
    async fn test_deleting_user_removes_profile() {
        let (pool, user) = setup().await;
        upsert_profile(&pool, user.id, &fields("Developer", &["rust"]))
            .await
            .unwrap();

        assert!(delete_user(&pool, user.id).await.unwrap());
        assert!(get_profile_by_user(&pool, user.id).await.unwrap().is_none());
        assert!(get_profile_id(&pool, user.id).await.unwrap().is_none());
    }
}
