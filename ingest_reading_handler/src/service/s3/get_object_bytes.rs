use anyhow::Context;
use aws_sdk_s3 as s3;
use lambda_runtime::tracing;

/// Downloads a model artifact into memory.
/// An empty object is an error since it can never hold a valid artifact.
pub async fn get_object_bytes(
    client: &s3::Client,
    bucket: &str,
    key: &str,
) -> anyhow::Result<Vec<u8>> {
    let output = client
        .get_object()
        .bucket(bucket)
        .key(key)
        .send()
        .await
        .with_context(|| format!("could not download artifact s3://{bucket}/{key}"))?;

    let artifact = output
        .body
        .collect()
        .await
        .with_context(|| format!("could not read artifact s3://{bucket}/{key}"))?
        .into_bytes();

    if artifact.is_empty() {
        anyhow::bail!("artifact s3://{bucket}/{key} is empty");
    }

    tracing::debug!(size = artifact.len(), "downloaded artifact");
    Ok(artifact.to_vec())
}
