use pinbot::client::Client;

#[test]
fn impl_std_error_trait() -> Result<(), Box<dyn std::error::Error>> {
    Client::new("https://www.pinterest.com", "MyBot/1.0 (pinbot integration test)")?;

    Ok(())
}

#[test]
fn usage_errors_are_std_errors() {
    let client = Client::new("https://www.pinterest.com", "MyBot/1.0").unwrap();

    let err: Box<dyn std::error::Error> = client
        .pinners()
        .following("someone", "spaceships", None)
        .err()
        .unwrap()
        .into();

    assert_eq!(err.to_string(), "Unknown following type \"spaceships\"");
}
