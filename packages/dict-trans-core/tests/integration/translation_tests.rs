//! Field translation through derived implementations.

use std::sync::Arc;

use dict_trans_core::meta::FieldId;
use dict_trans_core::{FieldOverrides, Translatable, TranslationEngine};

use super::helpers::{sample_cache, Address, Category, Record, User};

fn engine() -> TranslationEngine {
    TranslationEngine::new(Arc::new(sample_cache()))
}

#[test]
fn test_derived_descriptor_lists_plain_fields() {
    let descriptor = User::type_descriptor();
    let names: Vec<&str> = descriptor.fields.iter().map(|f| f.name).collect();
    assert_eq!(names, vec!["gender", "hobbies", "nickname", "level"]);
    assert!(descriptor.type_name.contains("::User@"));
    assert_eq!(
        descriptor.base().map(|b| b.type_name),
        Some(Record::type_descriptor().type_name)
    );
}

#[test]
fn test_split_and_join() {
    let mut user = User {
        hobbies: "1,2".to_string(),
        ..User::new("F")
    };

    engine().translate(&mut user, None);

    assert_eq!(user.hobbies, "Alpha|Beta");
    assert_eq!(user.gender, "Female");
}

#[test]
fn test_inherited_redirect() {
    let mut user = User {
        record: Record {
            status: Some("A".to_string()),
            ..Default::default()
        },
        ..User::new("M")
    };

    let stats = engine().translate(&mut user, None);

    assert_eq!(user.record.status.as_deref(), Some("A"));
    assert_eq!(user.record.status_code.as_deref(), Some("A"));
    assert_eq!(user.record.status_name, "Active");
    assert_eq!(stats.translated, 3);
}

#[test]
fn test_override_precedence_and_numeric_codes() {
    let mut user = User {
        level: 3,
        nickname: "neo".to_string(),
        ..User::new("M")
    };
    let overrides = FieldOverrides::new()
        .with("gender", "gender_short")
        .with("nickname", "gender");

    let stats = engine().translate(&mut user, Some(&overrides));

    assert_eq!(user.gender, "m");
    // Unknown code stays as it was
    assert_eq!(user.nickname, "neo");
    assert_eq!(stats.failed, 1);

    // A meaning cannot be stored in an integer field
    let mut user = User {
        level: 3,
        ..User::new("M")
    };
    let overrides = FieldOverrides::new().with("level", "level");
    let stats = engine().translate(&mut user, Some(&overrides));
    assert_eq!(user.level, 3);
    assert_eq!(user.gender, "Male");
    assert_eq!(stats.failed, 1);
}

#[test]
fn test_fail_soft_keeps_other_fields() {
    let mut user = User {
        hobbies: "1,9".to_string(),
        ..User::new("M")
    };

    let stats = engine().translate(&mut user, None);

    assert_eq!(user.hobbies, "1,9");
    assert_eq!(user.gender, "Male");
    assert_eq!(stats.translated, 1);
    assert_eq!(stats.failed, 1);
}

#[test]
fn test_skipped_field_is_not_addressable() {
    let user = User::new("M");
    let id = FieldId::new(User::type_descriptor().type_name, "password_hash");
    assert!(user.read_field(&id).is_err());
}

#[test]
fn test_raw_identifier_field() {
    let mut category = Category {
        r#type: "b".to_string(),
    };

    engine().translate(&mut category, None);

    assert_eq!(category.r#type, "Book");
    assert_eq!(Category::type_descriptor().fields[0].name, "type");
}

#[test]
fn test_plain_translate_leaves_nested_alone() {
    let mut user = User {
        address: Some(Address {
            city: "BJ".to_string(),
            street: "Main".to_string(),
        }),
        ..User::new("M")
    };

    engine().translate(&mut user, None);

    assert_eq!(user.address.as_ref().unwrap().city, "BJ");
}

fn translate_local_gender(engine: &TranslationEngine) -> String {
    #[derive(Translatable)]
    struct Rec {
        #[dict(code = "gender")]
        gender: String,
    }

    let mut rec = Rec {
        gender: "M".to_string(),
    };
    engine.translate(&mut rec, None);
    rec.gender
}

fn translate_local_status(engine: &TranslationEngine) -> String {
    #[derive(Translatable)]
    struct Rec {
        #[dict(code = "status")]
        status: String,
    }

    let mut rec = Rec {
        status: "A".to_string(),
    };
    engine.translate(&mut rec, None);
    rec.status
}

#[test]
fn test_same_named_local_types_stay_distinct() {
    let engine = engine();

    assert_eq!(translate_local_gender(&engine), "Male");
    assert_eq!(translate_local_status(&engine), "Active");
    // Resolution order must not matter
    assert_eq!(translate_local_gender(&engine), "Male");
}

#[test]
fn test_translate_list() {
    let mut users = vec![User::new("M"), User::new("F"), User::new("?")];

    let stats = engine().translate_list(&mut users, None);

    let genders: Vec<&str> = users.iter().map(|u| u.gender.as_str()).collect();
    assert_eq!(genders, vec!["Male", "Female", "?"]);
    assert_eq!(stats.objects, 3);
}
