use quartet_cli::run;
use serde_json::Value;
use serial_test::serial;

const VARS: &[&str] = &[
    "QUARTET_CONFIG",
    "QUARTET_SEED",
    "QUARTET_LUCK",
    "QUARTET_PLAYER",
    "QUARTET_POLICY",
    "QUARTET_ADAPTIVE",
];

fn clear_env() {
    for v in VARS {
        unsafe {
            std::env::remove_var(v);
        }
    }
}

fn cfg_json() -> (i32, Value, String) {
    let mut out: Vec<u8> = Vec::new();
    let mut err: Vec<u8> = Vec::new();
    let code = run(["quartet", "cfg"], &mut out, &mut err);
    let json = serde_json::from_slice(&out).unwrap_or(Value::Null);
    (code, json, String::from_utf8_lossy(&err).into_owned())
}

#[test]
#[serial]
fn cfg_shows_defaults() {
    clear_env();
    let (code, json, _) = cfg_json();
    assert_eq!(code, 0);
    assert_eq!(json["seed"]["value"], Value::Null);
    assert_eq!(json["seed"]["source"], "default");
    assert_eq!(json["luckiness"]["value"].as_f64(), Some(1.0));
    assert_eq!(json["policy"]["value"], "baseline");
    assert_eq!(json["adaptive"]["value"], true);
    assert_eq!(json["player_name"]["source"], "default");
}

#[test]
#[serial]
fn env_overrides_file() {
    clear_env();
    let dir = tempfile::tempdir().unwrap();
    let cfg_path = dir.path().join("quartet.toml");
    std::fs::write(
        &cfg_path,
        "seed = 456\nluckiness = 1.2\npolicy = \"lookahead\"\nadaptive = false\n",
    )
    .unwrap();
    unsafe {
        std::env::set_var("QUARTET_CONFIG", &cfg_path);
    }

    let (code, json, _) = cfg_json();
    assert_eq!(code, 0);
    assert_eq!(json["seed"]["value"].as_u64(), Some(456));
    assert_eq!(json["seed"]["source"], "file");
    assert_eq!(json["luckiness"]["value"].as_f64(), Some(1.2));
    assert_eq!(json["policy"]["source"], "file");
    assert_eq!(json["adaptive"]["value"], false);

    unsafe {
        std::env::set_var("QUARTET_SEED", "789");
        std::env::set_var("QUARTET_ADAPTIVE", "yes");
    }
    let (_, json, _) = cfg_json();
    assert_eq!(json["seed"]["value"].as_u64(), Some(789));
    assert_eq!(json["seed"]["source"], "env");
    assert_eq!(json["adaptive"]["value"], true);
    assert_eq!(json["adaptive"]["source"], "env");
    assert_eq!(json["policy"]["source"], "file");
    clear_env();
}

#[test]
#[serial]
fn flags_override_env() {
    clear_env();
    unsafe {
        std::env::set_var("QUARTET_SEED", "1");
    }
    let mut a: Vec<u8> = Vec::new();
    let mut b: Vec<u8> = Vec::new();
    let mut err: Vec<u8> = Vec::new();
    assert_eq!(run(["quartet", "rng"], &mut a, &mut err), 0);
    assert_eq!(run(["quartet", "rng", "--seed", "2"], &mut b, &mut err), 0);
    assert!(String::from_utf8_lossy(&a).contains("RNG seed: 1"));
    assert!(String::from_utf8_lossy(&b).contains("RNG seed: 2"));
    clear_env();
}

#[test]
#[serial]
fn invalid_env_values_fail_with_exit_2() {
    clear_env();
    unsafe {
        std::env::set_var("QUARTET_LUCK", "lots");
    }
    let (code, _, err) = cfg_json();
    assert_eq!(code, 2);
    assert!(err.contains("Invalid luckiness"));

    clear_env();
    unsafe {
        std::env::set_var("QUARTET_POLICY", "oracle");
    }
    let mut out: Vec<u8> = Vec::new();
    let mut err: Vec<u8> = Vec::new();
    let code = run(["quartet", "deal", "--seed", "1"], &mut out, &mut err);
    assert_eq!(code, 2);
    assert!(String::from_utf8_lossy(&err).contains("unknown policy"));
    clear_env();
}

#[test]
#[serial]
fn broken_config_file_is_reported() {
    clear_env();
    let dir = tempfile::tempdir().unwrap();
    let cfg_path = dir.path().join("bad.toml");
    std::fs::write(&cfg_path, "seed = \"not a number\"\n").unwrap();
    unsafe {
        std::env::set_var("QUARTET_CONFIG", &cfg_path);
    }
    let (code, _, err) = cfg_json();
    assert_eq!(code, 2);
    assert!(err.contains("cannot parse config file"));
    clear_env();
}
