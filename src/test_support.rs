use crate::config::Config;
use std::path::Path;

pub fn test_config(dir: impl AsRef<Path>) -> Config {
    let dir = dir.as_ref();
    Config {
        server_addr: "127.0.0.1:0".into(),
        jwt_secret: "test-secret".into(),
        session_ttl: 600,
        login_username: "admin".into(),
        login_password: "secret".into(),
        api_prefix: "/api".into(),
        attendance_file: dir.join("attendance_data.csv"),
        register_file: dir.join("REGISTER.csv"),
        export_file: dir.join("exported_attendance_data.csv"),
        log_dir: dir.join("logs"),
        log_level: tracing::Level::DEBUG,
    }
}
