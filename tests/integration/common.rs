use forcelink::{Session, SessionConfig};
use wiremock::matchers::{header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

pub const SESSION_ID: &str = "00Dxx0000001gEF!AQ4AQIntegration";
pub const DATA: &str = "/services/data/v62.0";

/// SOAP partner login response pointing the session back at `server`.
pub fn login_response(server: &MockServer) -> String {
    format!(
        r#"<?xml version="1.0" encoding="UTF-8"?>
<soapenv:Envelope xmlns:soapenv="http://schemas.xmlsoap.org/soap/envelope/" xmlns="urn:partner.soap.sforce.com">
  <soapenv:Body>
    <loginResponse>
      <result>
        <serverUrl>{}/services/Soap/u/62.0/00Dxx0000001gEF</serverUrl>
        <sessionId>{}</sessionId>
        <userId>005xx000001Sv6AAAS</userId>
        <userInfo>
          <userEmail>grace@example.com</userEmail>
          <userFullName>Grace Hopper</userFullName>
          <userName>grace@example.com.int</userName>
        </userInfo>
      </result>
    </loginResponse>
  </soapenv:Body>
</soapenv:Envelope>"#,
        server.uri(),
        SESSION_ID
    )
}

/// A session whose login and instance are both served by `server`.
pub fn session_for(server: &MockServer) -> Session {
    let config = SessionConfig::builder()
        .with_login_url(server.uri())
        .build();
    Session::new(config).expect("session config is valid")
}

/// Mount the SOAP login and return a logged-in session.
pub async fn logged_in(server: &MockServer) -> Session {
    Mock::given(method("POST"))
        .and(path("/services/Soap/u/62.0"))
        .and(header("SOAPAction", "login"))
        .respond_with(ResponseTemplate::new(200).set_body_string(login_response(server)))
        .mount(server)
        .await;

    let session = session_for(server);
    session
        .login("grace@example.com", "hunter2", "TOKEN")
        .await
        .expect("mock login succeeds");
    session
}
