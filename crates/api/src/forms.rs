use std::collections::HashMap;

use chrono::{Datelike, NaiveDate};

use infra::models::{NewPhoto, NewPlayer, PhotoPatch, PlayerPatch};

use crate::error::{AppError, FieldError};

pub const PREFERRED_FEET: &[&str] = &["Right", "Left", "Both"];
pub const POSITIONS: &[&str] = &["Goalkeeper", "Defender", "Midfielder", "Forward", "Striker"];
pub const TEAM_CATEGORIES: &[&str] = &["Senior Team", "U-17", "U-15", "U-13"];
pub const REGISTRATION_STATUSES: &[&str] = &["Registered", "Pending", "Not Registered"];
pub const PHOTO_CATEGORIES: &[&str] = &["Match Days", "Training", "Team Events"];

/// Completed years between `date_of_birth` and `today`. Age is always
/// derived here; client-submitted values are ignored.
pub fn age_on(date_of_birth: NaiveDate, today: NaiveDate) -> i32 {
    let mut age = today.year() - date_of_birth.year();
    if (today.month(), today.day()) < (date_of_birth.month(), date_of_birth.day()) {
        age -= 1;
    }
    age
}

/// Accumulates field-level errors while pulling typed values out of a
/// multipart form. Accessors return placeholders on failure; `finish`
/// rejects the whole form before any placeholder can be observed.
struct Form<'a> {
    fields: &'a HashMap<String, String>,
    errors: Vec<FieldError>,
}

impl<'a> Form<'a> {
    fn new(fields: &'a HashMap<String, String>) -> Self {
        Self {
            fields,
            errors: Vec::new(),
        }
    }

    /// Optional field; blank submissions count as absent.
    fn value(&self, key: &str) -> Option<String> {
        self.fields
            .get(key)
            .filter(|v| !v.is_empty())
            .cloned()
    }

    fn required(&mut self, key: &'static str) -> String {
        match self.value(key) {
            Some(v) => v,
            None => {
                self.errors.push(FieldError::new(key, "is required"));
                String::new()
            }
        }
    }

    fn date(&mut self, key: &'static str) -> Option<NaiveDate> {
        let raw = self.value(key)?;
        match parse_date(&raw) {
            Some(date) => Some(date),
            None => {
                self.errors
                    .push(FieldError::new(key, "must be a date in YYYY-MM-DD format"));
                None
            }
        }
    }

    fn required_date(&mut self, key: &'static str) -> NaiveDate {
        if self.value(key).is_none() {
            self.errors.push(FieldError::new(key, "is required"));
            return NaiveDate::MIN;
        }
        self.date(key).unwrap_or(NaiveDate::MIN)
    }

    fn one_of(&mut self, key: &'static str, allowed: &[&str]) -> Option<String> {
        let raw = self.value(key)?;
        if allowed.contains(&raw.as_str()) {
            Some(raw)
        } else {
            self.errors.push(FieldError::new(
                key,
                format!("must be one of: {}", allowed.join(", ")),
            ));
            None
        }
    }

    fn required_one_of(&mut self, key: &'static str, allowed: &[&str]) -> String {
        if self.value(key).is_none() {
            self.errors.push(FieldError::new(key, "is required"));
            return String::new();
        }
        self.one_of(key, allowed).unwrap_or_default()
    }

    fn finish(self) -> Result<(), AppError> {
        if self.errors.is_empty() {
            Ok(())
        } else {
            Err(AppError::Validation(self.errors))
        }
    }
}

/// Date inputs arrive either as plain `YYYY-MM-DD` or as a full ISO
/// timestamp from a date picker; only the date part matters.
fn parse_date(raw: &str) -> Option<NaiveDate> {
    let date_part = raw.split('T').next().unwrap_or(raw);
    NaiveDate::parse_from_str(date_part, "%Y-%m-%d").ok()
}

pub fn new_player(
    fields: &HashMap<String, String>,
    photo_url: Option<String>,
    today: NaiveDate,
) -> Result<NewPlayer, AppError> {
    let mut form = Form::new(fields);

    let first_name = form.required("firstName");
    let surname = form.required("surname");
    let id_number = form.required("idNumber");
    let date_of_birth = form.required_date("dateOfBirth");
    let nationality = form.required("nationality");
    let preferred_foot = form.required_one_of("preferredFoot", PREFERRED_FEET);
    let position = form.required_one_of("position", POSITIONS);
    let team_category = form.required_one_of("teamCategory", TEAM_CATEGORIES);
    let date_joined = form.required_date("dateJoined");
    let registration_status = form.required_one_of("registrationStatus", REGISTRATION_STATUSES);
    let race = form.value("race");
    let safa_id = form.value("safaId");
    let notes = form.value("notes");

    form.finish()?;

    Ok(NewPlayer {
        first_name,
        surname,
        id_number,
        date_of_birth,
        age: age_on(date_of_birth, today),
        race,
        nationality,
        safa_id,
        preferred_foot,
        position,
        team_category,
        date_joined,
        registration_status,
        photo_url,
        notes,
    })
}

pub fn player_patch(
    fields: &HashMap<String, String>,
    photo_url: Option<String>,
    today: NaiveDate,
) -> Result<PlayerPatch, AppError> {
    let mut form = Form::new(fields);

    let date_of_birth = form.date("dateOfBirth");
    let patch = PlayerPatch {
        first_name: form.value("firstName"),
        surname: form.value("surname"),
        id_number: form.value("idNumber"),
        date_of_birth,
        // age is derived, so it moves only when the date of birth does
        age: date_of_birth.map(|dob| age_on(dob, today)),
        race: form.value("race"),
        nationality: form.value("nationality"),
        safa_id: form.value("safaId"),
        preferred_foot: form.one_of("preferredFoot", PREFERRED_FEET),
        position: form.one_of("position", POSITIONS),
        team_category: form.one_of("teamCategory", TEAM_CATEGORIES),
        date_joined: form.date("dateJoined"),
        registration_status: form.one_of("registrationStatus", REGISTRATION_STATUSES),
        photo_url,
        notes: form.value("notes"),
    };

    form.finish()?;
    Ok(patch)
}

pub fn new_photo(
    fields: &HashMap<String, String>,
    image_url: String,
    uploaded_by: i32,
) -> Result<NewPhoto, AppError> {
    let mut form = Form::new(fields);

    let title = form.required("title");
    let category = form.required_one_of("category", PHOTO_CATEGORIES);
    let description = form.value("description");

    form.finish()?;

    Ok(NewPhoto {
        title,
        image_url,
        category,
        description,
        uploaded_by,
    })
}

pub fn photo_patch(
    fields: &HashMap<String, String>,
    image_url: Option<String>,
) -> Result<PhotoPatch, AppError> {
    let mut form = Form::new(fields);

    let patch = PhotoPatch {
        title: form.value("title"),
        image_url,
        category: form.one_of("category", PHOTO_CATEGORIES),
        description: form.value("description"),
    };

    form.finish()?;
    Ok(patch)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fields(pairs: &[(&str, &str)]) -> HashMap<String, String> {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    fn valid_player_fields() -> HashMap<String, String> {
        fields(&[
            ("firstName", "Jo"),
            ("surname", "Doe"),
            ("idNumber", "Z1"),
            ("dateOfBirth", "2000-01-01"),
            ("age", "25"),
            ("nationality", "South African"),
            ("preferredFoot", "Right"),
            ("position", "Midfielder"),
            ("teamCategory", "Senior Team"),
            ("dateJoined", "2024-01-01"),
            ("registrationStatus", "Pending"),
        ])
    }

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn age_counts_completed_years() {
        let dob = date(2000, 6, 15);
        assert_eq!(age_on(dob, date(2026, 6, 14)), 25);
        assert_eq!(age_on(dob, date(2026, 6, 15)), 26);
        assert_eq!(age_on(dob, date(2026, 6, 16)), 26);
    }

    #[test]
    fn new_player_derives_age_from_date_of_birth() {
        let player = new_player(&valid_player_fields(), None, date(2026, 8, 6)).unwrap();
        // the submitted age of 25 is ignored in favor of the derived value
        assert_eq!(player.age, 26);
        assert_eq!(player.date_of_birth, date(2000, 1, 1));
        assert!(player.race.is_none());
    }

    #[test]
    fn new_player_collects_all_field_errors() {
        let mut bad = valid_player_fields();
        bad.remove("firstName");
        bad.insert("position".into(), "Winger".into());
        bad.insert("dateOfBirth".into(), "01/01/2000".into());

        let err = new_player(&bad, None, date(2026, 8, 6)).unwrap_err();
        let AppError::Validation(errors) = err else {
            panic!("expected validation error, got {err:?}");
        };
        let fields: Vec<&str> = errors.iter().map(|e| e.field.as_str()).collect();
        assert!(fields.contains(&"firstName"));
        assert!(fields.contains(&"position"));
        assert!(fields.contains(&"dateOfBirth"));
    }

    #[test]
    fn dates_accept_iso_timestamps() {
        let mut ok = valid_player_fields();
        ok.insert("dateOfBirth".into(), "2000-01-01T00:00:00.000Z".into());
        let player = new_player(&ok, None, date(2026, 8, 6)).unwrap();
        assert_eq!(player.date_of_birth, date(2000, 1, 1));
    }

    #[test]
    fn patch_only_carries_submitted_fields() {
        let patch = player_patch(&fields(&[("notes", "x")]), None, date(2026, 8, 6)).unwrap();
        assert_eq!(patch.notes.as_deref(), Some("x"));
        assert!(patch.first_name.is_none());
        assert!(patch.age.is_none());
        assert!(patch.date_of_birth.is_none());
    }

    #[test]
    fn patch_recomputes_age_when_birth_date_moves() {
        let patch = player_patch(
            &fields(&[("dateOfBirth", "2010-03-01")]),
            None,
            date(2026, 8, 6),
        )
        .unwrap();
        assert_eq!(patch.date_of_birth, Some(date(2010, 3, 1)));
        assert_eq!(patch.age, Some(16));
    }

    #[test]
    fn patch_rejects_unknown_enum_values() {
        let err = player_patch(
            &fields(&[("teamCategory", "U-21")]),
            None,
            date(2026, 8, 6),
        )
        .unwrap_err();
        assert!(matches!(err, AppError::Validation(_)));
    }

    #[test]
    fn photo_requires_title_and_known_category() {
        let err = new_photo(&fields(&[("category", "Selfies")]), "/uploads/x.jpg".into(), 1)
            .unwrap_err();
        let AppError::Validation(errors) = err else {
            panic!("expected validation error");
        };
        assert_eq!(errors.len(), 2);

        let photo = new_photo(
            &fields(&[("title", "Derby day"), ("category", "Match Days")]),
            "/uploads/x.jpg".into(),
            1,
        )
        .unwrap();
        assert_eq!(photo.uploaded_by, 1);
        assert!(photo.description.is_none());
    }
}
