//! Integration tests

use std::collections::HashMap;
use std::time::Duration;

use chrono::NaiveDateTime;
use hookconf::{from_env, CaseMode, DecodeError, EnvDecode, EnvDecoder, DATE_TIME_LAYOUT};
use serial_test::serial;
use std::env;

#[derive(Debug, Default, EnvDecode)]
struct User {
    #[env("user_name")]
    pub user: String,

    #[env("user_sex")]
    pub sex: u32,
}

#[derive(Debug, Default, EnvDecode)]
struct Images {
    #[env("image_tag,default")]
    pub tag: String,

    #[env("create_at")]
    pub create_at: NaiveDateTime,

    #[env("duration,10s")]
    pub duration: Duration,
}

#[derive(Debug, Default, EnvDecode)]
struct Info {
    #[env("id,1")]
    pub id: i32,

    #[env("avatar")]
    pub avatar: String,

    #[env(nested)]
    pub images: Images,
}

#[derive(Debug, Default, EnvDecode)]
struct Data {
    #[env("data_code")]
    pub code: u32,

    #[env("data_msg")]
    pub msg: String,

    #[env(nested)]
    pub info: Info,
}

#[derive(Debug, Default, EnvDecode)]
struct TestEnv {
    #[env("name")]
    pub name: String,

    #[env("password,123")]
    pub password: String,

    #[env("number")]
    pub number: i32,

    #[env("boolean")]
    pub boolean: bool,

    #[env("arr")]
    pub arr: Vec<i32>,

    #[env("maps")]
    pub maps: HashMap<String, serde_json::Value>,

    #[env(nested)]
    pub user: User,

    #[env(nested)]
    pub data: Option<Box<Data>>,
}

const SCENARIO_VARS: &[(&str, &str)] = &[
    ("NAME", "test"),
    ("PASSWORD", "test1111"),
    ("NUMBER", "11"),
    ("BOOLEAN", "true"),
    ("ARR", "[1,1,1]"),
    ("USER_NAME", "env"),
    ("USER_SEX", "1"),
    ("DATA_CODE", "200"),
    ("DATA_MSG", "OK"),
    ("ID", "20"),
    ("CREATE_AT", "2006-01-02 15:04:05"),
    ("AVATAR", "http://127.0.0.1/image.png"),
    ("MAPS", r#"{"name":"123","num":1,"bool":true,"nil":null}"#),
];

fn set_scenario_vars() {
    for (name, value) in SCENARIO_VARS {
        env::set_var(name, value);
    }
}

fn clear_scenario_vars() {
    for (name, _) in SCENARIO_VARS {
        env::remove_var(name);
    }
}

#[test]
#[serial]
fn test_marshal_full_scenario() {
    set_scenario_vars();

    let mut target = TestEnv {
        data: Some(Box::new(Data::default())),
        ..TestEnv::default()
    };
    EnvDecoder::new(CaseMode::Upper).marshal(&mut target).unwrap();

    assert_eq!(target.name, "test");
    assert_eq!(target.password, "test1111");
    assert_eq!(target.number, 11);
    assert!(target.boolean);
    assert_eq!(target.arr, vec![1, 1, 1]);
    assert_eq!(target.maps.len(), 4);
    assert_eq!(target.maps["name"], serde_json::json!("123"));
    assert_eq!(target.maps["num"], serde_json::json!(1));
    assert_eq!(target.maps["bool"], serde_json::json!(true));
    assert_eq!(target.maps["nil"], serde_json::Value::Null);
    assert_eq!(target.user.user, "env");
    assert_eq!(target.user.sex, 1);

    let data = target.data.expect("nested data decoded");
    assert_eq!(data.code, 200);
    assert_eq!(data.msg, "OK");
    assert_eq!(data.info.id, 20);
    assert_eq!(data.info.avatar, "http://127.0.0.1/image.png");
    assert_eq!(
        data.info.images.create_at,
        NaiveDateTime::parse_from_str("2006-01-02 15:04:05", DATE_TIME_LAYOUT).unwrap()
    );
    assert_eq!(data.info.images.duration, Duration::from_secs(10));

    clear_scenario_vars();
}

#[test]
#[serial]
fn test_defaults_apply_when_unset() {
    clear_scenario_vars();

    let mut target = TestEnv {
        data: Some(Box::new(Data::default())),
        ..TestEnv::default()
    };
    EnvDecoder::new(CaseMode::Upper).marshal(&mut target).unwrap();

    assert_eq!(target.password, "123");
    let data = target.data.unwrap();
    assert_eq!(data.info.id, 1);
    assert_eq!(data.info.images.tag, "default");
    assert_eq!(data.info.images.duration, Duration::from_secs(10));
}

#[test]
#[serial]
fn test_unset_without_default_keeps_prior_value() {
    clear_scenario_vars();

    let mut target = TestEnv {
        name: "prior".to_string(),
        number: -3,
        ..TestEnv::default()
    };
    EnvDecoder::new(CaseMode::Upper).marshal(&mut target).unwrap();

    assert_eq!(target.name, "prior");
    assert_eq!(target.number, -3);
    assert!(target.arr.is_empty());
}

#[test]
#[serial]
fn test_from_env_convenience() {
    set_scenario_vars();

    let config: TestEnv = from_env().unwrap();
    assert_eq!(config.name, "test");
    // Option nested defaults to None and is skipped, not allocated
    assert!(config.data.is_none());

    clear_scenario_vars();
}

#[test]
fn test_prefix_and_suffix_with_map_source() {
    let source: HashMap<String, String> = [
        ("APP_NAME_LOGGER", "scoped"),
        ("APP_USER_NAME_LOGGER", "nested-scoped"),
    ]
    .iter()
    .map(|(k, v)| (k.to_string(), v.to_string()))
    .collect();

    let mut decoder = EnvDecoder::new(CaseMode::Upper);
    decoder.set_prefix("app_").set_suffix("_logger");

    let mut target = TestEnv::default();
    decoder.marshal_with(&mut target, &source).unwrap();

    assert_eq!(target.name, "scoped");
    assert_eq!(target.user.user, "nested-scoped");
}

#[test]
fn test_lower_and_as_is_case_modes() {
    let source: HashMap<String, String> = [
        ("app_name", "lower-hit"),
        ("app_Name", "as-is-hit"),
    ]
    .iter()
    .map(|(k, v)| (k.to_string(), v.to_string()))
    .collect();

    #[derive(Debug, Default, EnvDecode)]
    struct Lowered {
        #[env("name")]
        name: String,
    }

    #[derive(Debug, Default, EnvDecode)]
    struct Declared {
        #[env("Name")]
        name: String,
    }

    let mut lower_decoder = EnvDecoder::new(CaseMode::Lower);
    lower_decoder.set_prefix("APP_");
    let mut lowered = Lowered::default();
    lower_decoder.marshal_with(&mut lowered, &source).unwrap();
    assert_eq!(lowered.name, "lower-hit");

    let mut as_is_decoder = EnvDecoder::new(CaseMode::AsIs);
    as_is_decoder.set_prefix("app_");
    let mut declared = Declared::default();
    as_is_decoder.marshal_with(&mut declared, &source).unwrap();
    assert_eq!(declared.name, "as-is-hit");
}

#[test]
fn test_tag_parse_failure_surfaces() {
    #[derive(Debug, Default, EnvDecode)]
    struct Broken {
        #[env(",123")]
        password: String,
    }

    let source = HashMap::new();
    let err = EnvDecoder::new(CaseMode::Upper)
        .marshal_with(&mut Broken::default(), &source)
        .unwrap_err();
    assert!(matches!(err, DecodeError::TagParse { .. }));
}

#[test]
fn test_malformed_values_fail_with_context() {
    let cases: &[(&str, &str)] = &[
        ("NUMBER", "eleven"),
        ("BOOLEAN", "yes"),
        ("ARR", "1,1,1"),
        ("MAPS", "[1,2,3]"),
    ];

    for (var, value) in cases {
        let source: HashMap<String, String> =
            [(var.to_string(), value.to_string())].into_iter().collect();
        let mut target = TestEnv::default();
        let err = EnvDecoder::new(CaseMode::Upper)
            .marshal_with(&mut target, &source)
            .unwrap_err();
        match err {
            DecodeError::Coerce { var: name, value: attempted, .. } => {
                assert_eq!(&name, var);
                assert_eq!(&attempted, value);
            }
            other => panic!("expected Coerce error for {var}, got {other:?}"),
        }
    }
}

#[test]
fn test_nested_failure_propagates_unwrapped() {
    let source: HashMap<String, String> = [("ID".to_string(), "twenty".to_string())]
        .into_iter()
        .collect();

    let mut target = TestEnv {
        data: Some(Box::new(Data::default())),
        ..TestEnv::default()
    };
    let err = EnvDecoder::new(CaseMode::Upper)
        .marshal_with(&mut target, &source)
        .unwrap_err();

    // the innermost coercion failure comes back unchanged
    match err {
        DecodeError::Coerce { field, var, .. } => {
            assert_eq!(field, "id");
            assert_eq!(var, "ID");
        }
        other => panic!("expected Coerce error, got {other:?}"),
    }
}

#[test]
fn test_malformed_default_is_lazy() {
    #[derive(Debug, Default, EnvDecode)]
    struct LazyDefault {
        #[env("count,twenty")]
        count: u32,
    }

    // present env value: the bad default literal is never parsed
    let present: HashMap<String, String> = [("COUNT".to_string(), "5".to_string())]
        .into_iter()
        .collect();
    let mut target = LazyDefault::default();
    EnvDecoder::new(CaseMode::Upper)
        .marshal_with(&mut target, &present)
        .unwrap();
    assert_eq!(target.count, 5);

    // absent env value: now the default is coerced and fails
    let absent = HashMap::new();
    let err = EnvDecoder::new(CaseMode::Upper)
        .marshal_with(&mut LazyDefault::default(), &absent)
        .unwrap_err();
    assert!(matches!(err, DecodeError::Coerce { .. }));
}
