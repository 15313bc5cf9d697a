use chrono::Local;

pub const GREETING: &str = "Welcome to the Flask app!";

const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S%.6f";

pub async fn index() -> String {
    format!(
        "{} The current time is: {}",
        GREETING,
        Local::now().format(TIMESTAMP_FORMAT)
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDateTime;

    #[tokio::test]
    async fn greeting_ends_with_parseable_timestamp() {
        let body = index().await;
        let prefix = format!("{} The current time is: ", GREETING);
        assert!(body.starts_with(&prefix));

        let timestamp = &body[prefix.len()..];
        assert!(NaiveDateTime::parse_from_str(timestamp, TIMESTAMP_FORMAT).is_ok());
    }
}
