use std::path::{Path, PathBuf};

use anyhow::Context;
use lambda_runtime::tracing;
use potability_model::DefaultPredictor;

use crate::{config::ArtifactConfig, service::s3::S3};

/// Loads the scaler and model, downloading them only if this instance has not cached them yet
#[tracing::instrument(skip(s3))]
pub async fn load_predictor(s3: &S3, config: &ArtifactConfig) -> anyhow::Result<DefaultPredictor> {
    let scaler = fetch_artifact(s3, &config.bucket, &config.scaler_key, &config.cache_dir).await?;
    let model = fetch_artifact(s3, &config.bucket, &config.model_key, &config.cache_dir).await?;

    DefaultPredictor::from_artifacts(&scaler, &model).context("could not build predictor")
}

/// Returns the artifact stored under `key`, reading it from `cache_dir` when present
#[tracing::instrument(skip(s3))]
pub async fn fetch_artifact(
    s3: &S3,
    bucket: &str,
    key: &str,
    cache_dir: &Path,
) -> anyhow::Result<Vec<u8>> {
    let path = cache_path(cache_dir, key)?;

    if tokio::fs::try_exists(&path)
        .await
        .context(format!("could not check cache for {key}"))?
    {
        tracing::debug!(path=?path, "using cached artifact");
        return tokio::fs::read(&path)
            .await
            .context(format!("could not read cached artifact {}", path.display()));
    }

    tracing::info!(bucket=%bucket, key=%key, "downloading artifact");
    let bytes = s3.get_object_bytes(bucket, key).await?;

    tokio::fs::create_dir_all(cache_dir)
        .await
        .context("could not create artifact cache directory")?;

    // write next to the final path first so a partial download is never picked up as cached
    let partial = path.with_extension("part");
    tokio::fs::write(&partial, &bytes)
        .await
        .context(format!("could not write {}", partial.display()))?;
    tokio::fs::rename(&partial, &path)
        .await
        .context(format!("could not move artifact into {}", path.display()))?;

    Ok(bytes)
}

fn cache_path(cache_dir: &Path, key: &str) -> anyhow::Result<PathBuf> {
    let file_name = key.rsplit_once('/').map_or(key, |(_, name)| name);
    if file_name.is_empty() {
        anyhow::bail!("artifact key {key} does not name a file");
    }
    Ok(cache_dir.join(file_name))
}

#[cfg(test)]
mod tests {
    use mockall::predicate::eq;

    use super::*;

    const SCALER: &[u8] = br#"{"mean":[7.0,22000.0,4.0],"scale":[1.5,8700.0,0.8]}"#;
    const MODEL: &[u8] =
        br#"{"voting":"hard","estimators":[{"type":"logistic","coefficients":[0.0,-0.8,-1.2],"intercept":0.0}]}"#;

    #[tokio::test]
    async fn downloads_once_then_reads_from_cache() {
        let dir = tempfile::tempdir().unwrap();
        let mut mock = S3::default();
        mock.expect_get_object_bytes()
            .with(eq("bucket"), eq("models/scaler.json"))
            .times(1)
            .returning(|_, _| Ok(SCALER.to_vec()));

        let first = fetch_artifact(&mock, "bucket", "models/scaler.json", dir.path())
            .await
            .unwrap();
        let second = fetch_artifact(&mock, "bucket", "models/scaler.json", dir.path())
            .await
            .unwrap();

        assert_eq!(first, SCALER);
        assert_eq!(second, SCALER);
        assert!(dir.path().join("scaler.json").exists());
        assert!(!dir.path().join("scaler.part").exists());
    }

    #[tokio::test]
    async fn creates_missing_cache_directory() {
        let dir = tempfile::tempdir().unwrap();
        let nested = dir.path().join("artifacts");
        let mut mock = S3::default();
        mock.expect_get_object_bytes()
            .times(1)
            .returning(|_, _| Ok(MODEL.to_vec()));

        fetch_artifact(&mock, "bucket", "model.json", &nested)
            .await
            .unwrap();

        assert!(nested.join("model.json").exists());
    }

    #[tokio::test]
    async fn download_failure_is_propagated_and_nothing_is_cached() {
        let dir = tempfile::tempdir().unwrap();
        let mut mock = S3::default();
        mock.expect_get_object_bytes()
            .returning(|_, _| Err(anyhow::anyhow!("access denied")));

        let err = fetch_artifact(&mock, "bucket", "model.json", dir.path())
            .await
            .unwrap_err();

        assert_eq!(err.to_string(), "access denied");
        assert!(!dir.path().join("model.json").exists());
    }

    #[tokio::test]
    async fn loads_predictor_from_cached_artifacts() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("scaler.json"), SCALER).unwrap();
        std::fs::write(dir.path().join("model.json"), MODEL).unwrap();

        let mut mock = S3::default();
        mock.expect_get_object_bytes().never();

        let config = ArtifactConfig {
            bucket: "bucket".to_string(),
            scaler_key: "scaler.json".to_string(),
            model_key: "model.json".to_string(),
            cache_dir: dir.path().to_path_buf(),
        };

        assert!(load_predictor(&mock, &config).await.is_ok());
    }

    #[test]
    fn rejects_keys_without_a_file_name() {
        assert!(cache_path(Path::new("/tmp"), "models/").is_err());
        assert_eq!(
            cache_path(Path::new("/tmp"), "a/b/model.json").unwrap(),
            PathBuf::from("/tmp/model.json")
        );
    }
}
