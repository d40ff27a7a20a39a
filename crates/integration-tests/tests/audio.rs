mod harness;

use harness::config::ConfigBuilder;
use harness::mock_upstream::MockUpstream;
use harness::server::TestServer;
use reqwest::multipart::{Form, Part};
use serde_json::{Value, json};

fn audio_form(bytes: &[u8], filename: &str) -> Form {
    Form::new().part("audio", Part::bytes(bytes.to_vec()).file_name(filename.to_owned()))
}

fn entries(dir: &tempfile::TempDir) -> usize {
    std::fs::read_dir(dir.path()).unwrap().count()
}

#[tokio::test]
async fn whisper_transcribes_and_cleans_up() {
    let mock = MockUpstream::start().await.unwrap();
    let temp = tempfile::tempdir().unwrap();
    let server = TestServer::start(
        ConfigBuilder::new()
            .with_whisper(&mock.base_url())
            .with_temp_dir(temp.path())
            .build(),
    )
    .await
    .unwrap();

    let resp = server
        .client()
        .post(server.url("/upload_audio"))
        .multipart(audio_form(&[7_u8; 2048], "answer.webm"))
        .send()
        .await
        .unwrap();

    assert_eq!(resp.status(), 200);
    let body: Value = resp.json().await.unwrap();
    assert_eq!(body, json!({ "transcript": "received 2048 bytes" }));
    assert_eq!(mock.transcription_count(), 1);
    assert_eq!(mock.last_filename().as_deref(), Some("answer.webm"));
    assert_eq!(entries(&temp), 0);
}

#[tokio::test]
async fn failed_transcription_still_removes_temp_file() {
    let mock = MockUpstream::start_failing_transcription().await.unwrap();
    let temp = tempfile::tempdir().unwrap();
    let server = TestServer::start(
        ConfigBuilder::new()
            .with_whisper(&mock.base_url())
            .with_temp_dir(temp.path())
            .build(),
    )
    .await
    .unwrap();

    let resp = server
        .client()
        .post(server.url("/upload_audio"))
        .multipart(audio_form(b"RIFF....WAVE", "answer.wav"))
        .send()
        .await
        .unwrap();

    assert_eq!(resp.status(), 500);
    let body: Value = resp.json().await.unwrap();
    assert_eq!(body["error"], "Transcription failed");
    assert!(body["details"].as_str().unwrap().contains("decoder crashed"));
    assert_eq!(entries(&temp), 0);
}

#[cfg(unix)]
#[tokio::test]
async fn command_provider_reads_the_scoped_file() {
    let temp = tempfile::tempdir().unwrap();
    let server = TestServer::start(
        ConfigBuilder::new()
            .with_command("cat", &["{input}"])
            .with_temp_dir(temp.path())
            .build(),
    )
    .await
    .unwrap();

    let resp = server
        .client()
        .post(server.url("/upload_audio"))
        .multipart(audio_form(b"  where does it hurt?\n", "clip.ogg"))
        .send()
        .await
        .unwrap();

    assert_eq!(resp.status(), 200);
    let body: Value = resp.json().await.unwrap();
    assert_eq!(body["transcript"], "where does it hurt?");
    assert_eq!(entries(&temp), 0);
}

#[cfg(unix)]
#[tokio::test]
async fn failing_command_is_internal_error() {
    let temp = tempfile::tempdir().unwrap();
    let server = TestServer::start(
        ConfigBuilder::new()
            .with_command("false", &[])
            .with_temp_dir(temp.path())
            .build(),
    )
    .await
    .unwrap();

    let resp = server
        .client()
        .post(server.url("/upload_audio"))
        .multipart(audio_form(b"audio", "clip.webm"))
        .send()
        .await
        .unwrap();

    assert_eq!(resp.status(), 500);
    assert_eq!(entries(&temp), 0);
}

#[tokio::test]
async fn upload_without_audio_field_is_bad_request() {
    let mock = MockUpstream::start().await.unwrap();
    let server = TestServer::start(ConfigBuilder::new().with_whisper(&mock.base_url()).build())
        .await
        .unwrap();

    let form = Form::new().text("note", "no recording");
    let resp = server
        .client()
        .post(server.url("/upload_audio"))
        .multipart(form)
        .send()
        .await
        .unwrap();

    assert_eq!(resp.status(), 400);
    let body: Value = resp.json().await.unwrap();
    assert_eq!(body, json!({ "error": "No audio file uploaded" }));
    assert_eq!(mock.transcription_count(), 0);
}

#[tokio::test]
async fn non_multipart_upload_is_bad_request() {
    let mock = MockUpstream::start().await.unwrap();
    let server = TestServer::start(ConfigBuilder::new().with_whisper(&mock.base_url()).build())
        .await
        .unwrap();

    let resp = server
        .client()
        .post(server.url("/upload_audio"))
        .json(&json!({ "audio": "base64" }))
        .send()
        .await
        .unwrap();

    assert_eq!(resp.status(), 400);
}
