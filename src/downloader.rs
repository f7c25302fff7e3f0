//! Writes a list of image URLs into a folder, one request at a time.

use std::path::{Path, PathBuf};

use bytes::Bytes;
use fs_err as fs;
use log::{debug, info};
use reqwest::{Client, StatusCode};
use thiserror::Error;
use url::Url;

#[derive(Debug, Error)]
pub enum DownloadError {
    #[error("HTTP error while downloading {url}")]
    Http { url: String, source: reqwest::Error },

    #[error("downloading {url} returned HTTP {status}")]
    ResponseError { url: String, status: StatusCode },

    #[error("invalid image URL '{url}'")]
    InvalidUrl {
        url: String,
        source: url::ParseError,
    },

    #[error("image URL '{url}' has no file name")]
    MissingFileName { url: String },

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

/// The last path segment of `url`, percent-decoded, ignoring any query
/// string. URLs ending in `/` have no file name.
pub fn file_name_for(url: &str) -> Result<String, DownloadError> {
    let parsed = Url::parse(url).map_err(|source| DownloadError::InvalidUrl {
        url: url.to_owned(),
        source,
    })?;

    let missing = || DownloadError::MissingFileName {
        url: url.to_owned(),
    };

    let segment = parsed
        .path_segments()
        .and_then(|mut segments| segments.next_back())
        .ok_or_else(missing)?;

    let name = urlencoding::decode(segment).map_err(|_| missing())?;

    // The decoded name must stay inside the download folder.
    if name.is_empty() || name == "." || name == ".." || name.contains(['/', '\\']) {
        return Err(missing());
    }

    Ok(name.into_owned())
}

/// Downloads every URL into `folder`, creating it if needed. Existing files
/// with the same name are overwritten. Stops at the first failure; files
/// written before it are left in place.
pub async fn download_all(
    client: &Client,
    folder: &Path,
    urls: &[String],
) -> Result<Vec<PathBuf>, DownloadError> {
    fs::create_dir_all(folder)?;

    let mut written = Vec::with_capacity(urls.len());
    for (index, url) in urls.iter().enumerate() {
        let file_name = file_name_for(url)?;
        let path = folder.join(&file_name);

        info!("[{}/{}] {}", index + 1, urls.len(), file_name);

        let contents = fetch(client, url).await?;
        debug!("writing {} bytes to {}", contents.len(), path.display());
        fs::write(&path, &contents)?;

        written.push(path);
    }

    Ok(written)
}

async fn fetch(client: &Client, url: &str) -> Result<Bytes, DownloadError> {
    let http_error = |source| DownloadError::Http {
        url: url.to_owned(),
        source,
    };

    let response = client.get(url).send().await.map_err(http_error)?;

    let status = response.status();
    if !status.is_success() {
        return Err(DownloadError::ResponseError {
            url: url.to_owned(),
            status,
        });
    }

    response.bytes().await.map_err(http_error)
}

#[cfg(test)]
mod tests {
    use super::*;

    use tempfile::TempDir;
    use wiremock::matchers::{method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    #[test]
    fn file_name_is_last_path_segment() {
        assert_eq!(
            file_name_for("https://upload-bbs.mihoyo.com/upload/2021/09/30/abc.png").unwrap(),
            "abc.png"
        );
        assert_eq!(
            file_name_for("https://img.example/a/b.jpg?x-oss-process=image/resize").unwrap(),
            "b.jpg"
        );
    }

    #[test]
    fn file_name_is_percent_decoded() {
        assert_eq!(file_name_for("https://img.example/a b.png").unwrap(), "a b.png");
        assert_eq!(file_name_for("https://img.example/up/图.png").unwrap(), "图.png");
        assert_eq!(
            file_name_for("https://img.example/%E5%9B%BE%201.jpg").unwrap(),
            "图 1.jpg"
        );
    }

    #[test]
    fn decoded_name_cannot_leave_the_folder() {
        for url in [
            "https://img.example/a/..%2F..%2Fevil.png",
            "https://img.example/a/..%5Cevil.png",
            "https://img.example/a/%2E%2E",
        ] {
            assert!(
                matches!(
                    file_name_for(url),
                    Err(DownloadError::MissingFileName { .. })
                ),
                "{url}"
            );
        }
    }

    #[test]
    fn url_without_path_has_no_file_name() {
        assert!(matches!(
            file_name_for("https://img.example/"),
            Err(DownloadError::MissingFileName { .. })
        ));
        assert!(matches!(
            file_name_for("https://img.example/dir/"),
            Err(DownloadError::MissingFileName { .. })
        ));
        assert!(matches!(
            file_name_for("not a url"),
            Err(DownloadError::InvalidUrl { .. })
        ));
    }

    #[tokio::test]
    async fn downloads_into_new_folder() {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/images/a.png"))
            .respond_with(ResponseTemplate::new(200).set_body_bytes(b"first".to_vec()))
            .expect(1)
            .mount(&server)
            .await;
        Mock::given(method("GET"))
            .and(path("/other/b.jpg"))
            .respond_with(ResponseTemplate::new(200).set_body_bytes(b"second".to_vec()))
            .expect(1)
            .mount(&server)
            .await;

        let temp_dir = TempDir::new().unwrap();
        let folder = temp_dir.path().join("Genshin");

        let urls = vec![
            format!("{}/images/a.png", server.uri()),
            format!("{}/other/b.jpg", server.uri()),
        ];

        let written = download_all(&Client::new(), &folder, &urls).await.unwrap();

        assert_eq!(written, [folder.join("a.png"), folder.join("b.jpg")]);
        assert_eq!(fs::read(folder.join("a.png")).unwrap(), b"first");
        assert_eq!(fs::read(folder.join("b.jpg")).unwrap(), b"second");
    }

    #[tokio::test]
    async fn overwrites_existing_files() {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/a.png"))
            .respond_with(ResponseTemplate::new(200).set_body_bytes(b"new".to_vec()))
            .mount(&server)
            .await;

        let temp_dir = TempDir::new().unwrap();
        fs::write(temp_dir.path().join("a.png"), b"old").unwrap();

        let urls = vec![format!("{}/a.png", server.uri())];
        download_all(&Client::new(), temp_dir.path(), &urls)
            .await
            .unwrap();

        assert_eq!(fs::read(temp_dir.path().join("a.png")).unwrap(), b"new");
    }

    #[tokio::test]
    async fn failure_stops_the_batch() {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/1.png"))
            .respond_with(ResponseTemplate::new(200).set_body_bytes(b"one".to_vec()))
            .expect(1)
            .mount(&server)
            .await;
        Mock::given(method("GET"))
            .and(path("/2.png"))
            .respond_with(ResponseTemplate::new(404))
            .expect(1)
            .mount(&server)
            .await;
        Mock::given(method("GET"))
            .and(path("/3.png"))
            .respond_with(ResponseTemplate::new(200))
            .expect(0)
            .mount(&server)
            .await;

        let temp_dir = TempDir::new().unwrap();
        let urls: Vec<String> = ["1.png", "2.png", "3.png"]
            .iter()
            .map(|name| format!("{}/{}", server.uri(), name))
            .collect();

        let result = download_all(&Client::new(), temp_dir.path(), &urls).await;

        match result {
            Err(DownloadError::ResponseError { status, url }) => {
                assert_eq!(status, StatusCode::NOT_FOUND);
                assert!(url.ends_with("/2.png"));
            }
            other => panic!("expected response error, got {:?}", other),
        }

        assert!(temp_dir.path().join("1.png").exists());
        assert!(!temp_dir.path().join("2.png").exists());
        assert!(!temp_dir.path().join("3.png").exists());
    }

    #[tokio::test]
    async fn empty_batch_still_creates_folder() {
        let temp_dir = TempDir::new().unwrap();
        let folder = temp_dir.path().join("nested").join("StarRail");

        let written = download_all(&Client::new(), &folder, &[]).await.unwrap();

        assert!(written.is_empty());
        assert!(folder.is_dir());
    }
}
