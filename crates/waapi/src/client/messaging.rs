//! Message-sending operations.

use crate::encoding::Payload;
use crate::error::WaapiResult;
use crate::http::{HttpBackend, HttpMethod};
use crate::models::{Contact, Envelope, Location, MediaOptions, MediaSource, ResolvedMedia};

use super::{WaapiClient, endpoints, require};

impl<B: HttpBackend> WaapiClient<B> {
    /// Send a plain text message.
    pub async fn send_text(&self, chat_id: &str, text: &str) -> WaapiResult<Envelope> {
        require(chat_id, "chat id")?;
        require(text, "message text")?;

        let payload = Payload::new().text("chatId", chat_id).text("message", text);
        self.dispatch(HttpMethod::Post, endpoints::SEND_MESSAGE, payload)
            .await
    }

    /// Send an image, video or document, with optional caption and file name.
    pub async fn send_media(
        &self,
        chat_id: &str,
        media: MediaSource,
        options: MediaOptions,
    ) -> WaapiResult<Envelope> {
        require(chat_id, "chat id")?;

        let payload = media_payload(chat_id, media, options.filename.as_deref())
            .await?
            .optional_text("caption", options.caption.as_deref())
            .optional_text("filename", options.filename.as_deref());
        self.dispatch(HttpMethod::Post, endpoints::SEND_MEDIA, payload)
            .await
    }

    /// Send a sticker.
    pub async fn send_sticker(&self, chat_id: &str, media: MediaSource) -> WaapiResult<Envelope> {
        require(chat_id, "chat id")?;

        let payload = media_payload(chat_id, media, None).await?;
        self.dispatch(HttpMethod::Post, endpoints::SEND_STICKER, payload)
            .await
    }

    /// Send an audio file as a voice note.
    pub async fn send_voice_note(
        &self,
        chat_id: &str,
        media: MediaSource,
    ) -> WaapiResult<Envelope> {
        require(chat_id, "chat id")?;

        let payload = media_payload(chat_id, media, None).await?;
        self.dispatch(HttpMethod::Post, endpoints::SEND_VOICE, payload)
            .await
    }

    /// Share a location pin.
    pub async fn send_location(&self, chat_id: &str, location: &Location) -> WaapiResult<Envelope> {
        require(chat_id, "chat id")?;
        location.validate()?;

        let payload = Payload::new()
            .text("chatId", chat_id)
            .number("latitude", location.latitude)
            .number("longitude", location.longitude)
            .text("name", location.name.as_str())
            .text("address", location.address.as_str());
        self.dispatch(HttpMethod::Post, endpoints::SEND_LOCATION, payload)
            .await
    }

    /// Share a contact card.
    pub async fn send_contact(&self, chat_id: &str, contact: &Contact) -> WaapiResult<Envelope> {
        require(chat_id, "chat id")?;
        contact.validate()?;

        let payload = Payload::new()
            .text("chatId", chat_id)
            .contact(contact.clone());
        self.dispatch(HttpMethod::Post, endpoints::SEND_CONTACT, payload)
            .await
    }

    /// Send a pre-registered template.
    ///
    /// `params` fill the template's placeholders in order, starting at 1.
    pub async fn send_template(
        &self,
        chat_id: &str,
        template_id: &str,
        params: &[String],
    ) -> WaapiResult<Envelope> {
        require(chat_id, "chat id")?;
        require(template_id, "template id")?;

        let payload = Payload::new()
            .text("chatId", chat_id)
            .text("templateId", template_id)
            .variables(params.to_vec());
        self.dispatch(HttpMethod::Post, endpoints::SEND_TEMPLATE, payload)
            .await
    }
}

/// Start a payload for a media-bearing message.
async fn media_payload(
    chat_id: &str,
    media: MediaSource,
    file_name: Option<&str>,
) -> WaapiResult<Payload> {
    let payload = Payload::new().text("chatId", chat_id);
    Ok(match media.resolve(file_name).await? {
        ResolvedMedia::Remote(url) => payload.text("url", url),
        ResolvedMedia::Attachment(file) => payload.attachment(file),
    })
}

#[cfg(test)]
mod tests {
    use super::super::tests::test_config;
    use super::*;
    use crate::config::WireFormat;
    use crate::error::WaapiError;
    use crate::http::RequestBody;
    use crate::http::testing::FakeBackend;
    use std::time::Duration;

    const CHAT: &str = "201234567890@c.us";

    fn client(backend: FakeBackend) -> WaapiClient<FakeBackend> {
        WaapiClient::with_backend(&test_config(), backend).unwrap()
    }

    #[tokio::test]
    async fn test_send_text_issues_one_request() {
        let client = client(FakeBackend::replying(200, r#"{"status":"queued"}"#));

        let envelope = client.send_text(CHAT, "hello").await.unwrap();
        assert_eq!(envelope.status, "queued");

        let request = client.backend.only_request();
        assert_eq!(request.method, HttpMethod::Post);
        assert_eq!(request.path(), "/api/send-message");
        assert_eq!(request.field("chatId").as_deref(), Some(CHAT));
        assert_eq!(request.field("message").as_deref(), Some("hello"));
        assert_eq!(request.field("appkey").as_deref(), Some("app"));
        assert_eq!(request.field("authkey").as_deref(), Some("auth"));
    }

    #[tokio::test]
    async fn test_send_text_validates_before_sending() {
        let client = client(FakeBackend::new());

        let err = client.send_text("", "hello").await.unwrap_err();
        assert!(matches!(err, WaapiError::InvalidArgument(_)));
        let err = client.send_text(CHAT, "  ").await.unwrap_err();
        assert!(matches!(err, WaapiError::InvalidArgument(_)));
        assert!(client.backend.requests().is_empty());
    }

    #[tokio::test]
    async fn test_send_media_with_url() {
        let client = client(FakeBackend::new());
        let options = MediaOptions::new().with_caption("look");

        client
            .send_media(CHAT, MediaSource::url("https://cdn.test/cat.jpg"), options)
            .await
            .unwrap();

        let request = client.backend.only_request();
        assert_eq!(request.path(), "/api/send-media");
        assert_eq!(request.field("url").as_deref(), Some("https://cdn.test/cat.jpg"));
        assert_eq!(request.field("caption").as_deref(), Some("look"));
        assert_eq!(request.field("filename"), None);
        assert!(matches!(request.body, RequestBody::Form(_)));
    }

    #[tokio::test]
    async fn test_send_media_with_bytes_is_multipart() {
        let client = client(FakeBackend::new());
        let options = MediaOptions::new().with_filename("report.pdf");

        client
            .send_media(CHAT, MediaSource::bytes("draft.pdf", b"%PDF".to_vec()), options)
            .await
            .unwrap();

        let request = client.backend.only_request();
        assert_eq!(request.field("filename").as_deref(), Some("report.pdf"));
        match request.body {
            RequestBody::Multipart { file, .. } => {
                assert_eq!(file.file_name, "report.pdf");
                assert_eq!(file.mime_type, "application/pdf");
            }
            other => panic!("expected multipart body, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_send_voice_note_from_local_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("greeting.ogg");
        std::fs::write(&path, b"OggS-voice").unwrap();

        let client = client(FakeBackend::new());
        client
            .send_voice_note(CHAT, MediaSource::path(&path))
            .await
            .unwrap();

        let request = client.backend.only_request();
        assert_eq!(request.path(), "/api/send-voice");
        assert_eq!(request.field("chatId").as_deref(), Some(CHAT));
        assert_eq!(request.field("appkey").as_deref(), Some("app"));
        match request.body {
            RequestBody::Multipart { file, .. } => {
                assert_eq!(file.field, "file");
                assert_eq!(file.file_name, "greeting.ogg");
                assert_eq!(file.content, b"OggS-voice".to_vec());
            }
            other => panic!("expected multipart body, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_send_media_requires_a_source() {
        let client = client(FakeBackend::new());

        let missing = MediaSource::from_parts(None, None);
        assert!(matches!(missing, Err(WaapiError::InvalidArgument(_))));

        let err = client
            .send_media(CHAT, MediaSource::url(""), MediaOptions::default())
            .await
            .unwrap_err();
        assert!(matches!(err, WaapiError::InvalidArgument(_)));
        assert!(client.backend.requests().is_empty());
    }

    #[tokio::test]
    async fn test_sticker_and_voice_note_paths() {
        let client = client(FakeBackend::new());

        client
            .send_sticker(CHAT, MediaSource::bytes("s.webp", vec![1]))
            .await
            .unwrap();
        client
            .send_voice_note(CHAT, MediaSource::url("https://cdn.test/v.ogg"))
            .await
            .unwrap();

        let paths: Vec<String> = client
            .backend
            .requests()
            .iter()
            .map(|r| r.path().to_string())
            .collect();
        assert_eq!(paths, vec!["/api/send-sticker", "/api/send-voice"]);
    }

    #[tokio::test]
    async fn test_send_location_fields() {
        let client = client(FakeBackend::new());
        let location = Location::new(30.0, 31.0, "Cairo", "Egypt");

        client.send_location(CHAT, &location).await.unwrap();

        let request = client.backend.only_request();
        let lat: f64 = request.field("latitude").unwrap().parse().unwrap();
        let lng: f64 = request.field("longitude").unwrap().parse().unwrap();
        assert!((lat - 30.0).abs() < f64::EPSILON);
        assert!((lng - 31.0).abs() < f64::EPSILON);
        assert_eq!(request.field("name").as_deref(), Some("Cairo"));
        assert_eq!(request.field("address").as_deref(), Some("Egypt"));
    }

    #[tokio::test]
    async fn test_send_contact_uses_bracketed_fields() {
        let client = client(FakeBackend::new());
        let contact = Contact::new("Test User", "123456").with_organization("Acme");

        client.send_contact(CHAT, &contact).await.unwrap();

        let request = client.backend.only_request();
        assert_eq!(request.field("contact[name]").as_deref(), Some("Test User"));
        assert_eq!(request.field("contact[number]").as_deref(), Some("123456"));
        assert_eq!(request.field("contact[organization]").as_deref(), Some("Acme"));
    }

    #[tokio::test]
    async fn test_send_contact_json_mode_uses_vcard() {
        let config = test_config().with_wire_format(WireFormat::JsonHeaderAuth);
        let client = WaapiClient::with_backend(&config, FakeBackend::new()).unwrap();
        let contact = Contact::new("Test User", "123456");

        client.send_contact(CHAT, &contact).await.unwrap();

        let request = client.backend.only_request();
        assert_eq!(request.field("vcard"), Some(contact.to_vcard()));
        assert_eq!(request.header("x-auth-key"), Some("auth"));
    }

    fn variable_fields(client: &WaapiClient<FakeBackend>) -> Vec<(String, String)> {
        match client.backend.only_request().body {
            RequestBody::Form(fields) => fields
                .into_iter()
                .filter(|(key, _)| key.starts_with("variables["))
                .collect(),
            other => panic!("expected form body, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_send_template_without_params() {
        let client = client(FakeBackend::new());

        client.send_template(CHAT, "welcome", &[]).await.unwrap();

        assert!(variable_fields(&client).is_empty());
        assert_eq!(
            client.backend.only_request().field("templateId").as_deref(),
            Some("welcome")
        );
    }

    #[tokio::test]
    async fn test_send_template_with_params() {
        let client = client(FakeBackend::new());
        let params = vec!["a".to_string(), "b".to_string()];

        client.send_template(CHAT, "welcome", &params).await.unwrap();

        assert_eq!(
            variable_fields(&client),
            vec![
                ("variables[{1}]".to_string(), "a".to_string()),
                ("variables[{2}]".to_string(), "b".to_string()),
            ]
        );
    }

    #[tokio::test]
    async fn test_send_template_requires_id() {
        let client = client(FakeBackend::new());
        let err = client.send_template(CHAT, "", &[]).await.unwrap_err();
        assert!(matches!(err, WaapiError::InvalidArgument(_)));
    }

    #[tokio::test]
    async fn test_concurrent_calls_are_independent() {
        let backend = FakeBackend::new()
            .with_route("send-message", 200, r#"{"status":"success","data":{"kind":"text"}}"#)
            .with_delay("send-message", Duration::from_millis(50))
            .with_route("send-location", 200, r#"{"status":"success","data":{"kind":"location"}}"#);
        let client = client(backend);
        let location = Location::new(30.0, 31.0, "Cairo", "Egypt");

        let (text, pin) = tokio::join!(
            client.send_text(CHAT, "first"),
            client.send_location("other@c.us", &location),
        );

        assert_eq!(text.unwrap().data.unwrap()["kind"], "text");
        assert_eq!(pin.unwrap().data.unwrap()["kind"], "location");

        let requests = client.backend.requests();
        assert_eq!(requests.len(), 2);
        let text_request = requests
            .iter()
            .find(|r| r.path().ends_with("send-message"))
            .unwrap();
        assert_eq!(text_request.field("chatId").as_deref(), Some(CHAT));
        assert_eq!(text_request.field("name"), None);
    }
}
