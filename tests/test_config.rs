use docroot::config::{Config, Protocol};
use std::net::SocketAddr;
use std::path::PathBuf;
use std::time::Duration;

#[test]
fn test_config_defaults() {
    let cfg = Config::default();

    assert_eq!(cfg.protocol, Protocol::V4);
    assert_eq!(cfg.port, 8080);
    assert_eq!(cfg.backlog, 10);
    assert_eq!(cfg.max_connections, None);
    assert_eq!(cfg.read_timeout(), None);
}

#[test]
fn test_config_from_args() {
    let cfg = Config::from_args(&["6", "9000", "/srv/www"]).unwrap();

    assert_eq!(cfg.protocol, Protocol::V6);
    assert_eq!(cfg.port, 9000);
    assert_eq!(cfg.root, PathBuf::from("/srv/www"));
    assert_eq!(cfg.backlog, 10);
}

#[test]
fn test_config_from_args_rejects_bad_input() {
    assert!(Config::from_args(&["4", "8080"]).is_err());
    assert!(Config::from_args(&["5", "8080", "/srv"]).is_err());
    assert!(Config::from_args(&["4", "http", "/srv"]).is_err());
    assert!(Config::from_args(&["4", "70000", "/srv"]).is_err());
}

#[test]
fn test_config_listen_addr_per_protocol() {
    let v4 = Config::from_args(&["4", "8000", "."]).unwrap();
    let v6 = Config::from_args(&["6", "8000", "."]).unwrap();

    assert_eq!(v4.listen_addr(), "0.0.0.0:8000".parse::<SocketAddr>().unwrap());
    assert_eq!(v6.listen_addr(), "[::]:8000".parse::<SocketAddr>().unwrap());
}

#[test]
fn test_config_from_yaml() {
    let cfg = Config::from_yaml(
        "protocol: 6\nport: 3000\nroot: /var/www\nmax_connections: 32\nread_timeout_secs: 5\n",
    )
    .unwrap();

    assert_eq!(cfg.protocol, Protocol::V6);
    assert_eq!(cfg.port, 3000);
    assert_eq!(cfg.root, PathBuf::from("/var/www"));
    assert_eq!(cfg.max_connections, Some(32));
    assert_eq!(cfg.read_timeout(), Some(Duration::from_secs(5)));
}

#[test]
fn test_config_from_yaml_fills_defaults() {
    let cfg = Config::from_yaml("protocol: v4\nroot: site\n").unwrap();

    assert_eq!(cfg.protocol, Protocol::V4);
    assert_eq!(cfg.port, 8080);
    assert_eq!(cfg.backlog, 10);
    assert_eq!(cfg.root, PathBuf::from("site"));
}

#[test]
fn test_config_from_yaml_rejects_unknown_protocol() {
    assert!(Config::from_yaml("protocol: 5\n").is_err());
}

#[test]
fn test_config_from_env() {
    // All env mutation lives in this one test so parallel tests never race on it.
    unsafe {
        std::env::set_var("DOCROOT_PROTOCOL", "6");
        std::env::set_var("DOCROOT_PORT", "5000");
        std::env::set_var("DOCROOT_ROOT", "/tmp/site");
        std::env::set_var("DOCROOT_MAX_CONNECTIONS", "4");
        std::env::set_var("DOCROOT_READ_TIMEOUT", "2");
    }
    let cfg = Config::load().unwrap();
    assert_eq!(cfg.protocol, Protocol::V6);
    assert_eq!(cfg.port, 5000);
    assert_eq!(cfg.root, PathBuf::from("/tmp/site"));
    assert_eq!(cfg.max_connections, Some(4));
    assert_eq!(cfg.read_timeout(), Some(Duration::from_secs(2)));

    unsafe {
        std::env::set_var("DOCROOT_PORT", "not-a-port");
    }
    assert!(Config::load().is_err());

    unsafe {
        for key in [
            "DOCROOT_PROTOCOL",
            "DOCROOT_PORT",
            "DOCROOT_ROOT",
            "DOCROOT_MAX_CONNECTIONS",
            "DOCROOT_READ_TIMEOUT",
        ] {
            std::env::remove_var(key);
        }
    }
    let cfg = Config::load().unwrap();
    assert_eq!(cfg.port, 8080);
}

#[test]
fn test_config_canonical_root_requires_directory() {
    let dir = std::env::temp_dir().join(format!("docroot-config-{}", std::process::id()));
    std::fs::create_dir_all(&dir).unwrap();
    let file = dir.join("plain.txt");
    std::fs::write(&file, b"x").unwrap();

    let mut cfg = Config::default();
    cfg.root = dir.clone();
    assert_eq!(cfg.canonical_root().unwrap(), dir.canonicalize().unwrap());

    cfg.root = file;
    assert!(cfg.canonical_root().is_err());

    cfg.root = dir.join("does-not-exist");
    assert!(cfg.canonical_root().is_err());

    std::fs::remove_dir_all(&dir).unwrap();
}
