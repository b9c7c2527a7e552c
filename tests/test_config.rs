use courier::config::Config;

#[test]
fn test_from_yaml_parses_full_config() {
    let cfg = Config::from_yaml("url: http://10.0.0.1:8081/health\nmethod: HEAD\nbody: hi\n")
        .unwrap();

    assert_eq!(cfg.url, "http://10.0.0.1:8081/health");
    assert_eq!(cfg.method, "HEAD");
    assert_eq!(cfg.body.as_deref(), Some("hi"));
}

#[test]
fn test_from_yaml_fills_defaults() {
    let cfg = Config::from_yaml("method: POST\n").unwrap();

    assert_eq!(cfg.url, "http://127.0.0.1:8080/");
    assert_eq!(cfg.method, "POST");
    assert!(cfg.body.is_none());
}

#[test]
fn test_from_yaml_rejects_garbage() {
    assert!(Config::from_yaml("url: [unclosed").is_err());
}

#[test]
fn test_load_honors_env_and_defaults() {
    // Single test for everything env-backed: parallel tests sharing
    // process-wide env vars would race
    unsafe {
        std::env::remove_var("COURIER_CONFIG");
        std::env::remove_var("COURIER_URL");
        std::env::remove_var("COURIER_METHOD");
        std::env::remove_var("COURIER_BODY");
    }
    let cfg = Config::load().unwrap();
    assert_eq!(cfg.url, "http://127.0.0.1:8080/");
    assert_eq!(cfg.method, "GET");
    assert!(cfg.body.is_none());

    unsafe {
        std::env::set_var("COURIER_URL", "http://127.0.0.1:9000/status");
        std::env::set_var("COURIER_METHOD", "POST");
        std::env::set_var("COURIER_BODY", "ping");
    }
    let cfg = Config::load().unwrap();
    assert_eq!(cfg.url, "http://127.0.0.1:9000/status");
    assert_eq!(cfg.method, "POST");
    assert_eq!(cfg.body.as_deref(), Some("ping"));

    unsafe {
        std::env::remove_var("COURIER_URL");
        std::env::remove_var("COURIER_METHOD");
        std::env::remove_var("COURIER_BODY");
    }
}

#[test]
fn test_config_clone() {
    let cfg = Config::from_yaml("method: GET\n").unwrap();
    let copy = cfg.clone();

    assert_eq!(cfg.url, copy.url);
    assert_eq!(cfg.method, copy.method);
}
