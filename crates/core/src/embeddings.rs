use anyhow::Context;
use providers::EmbeddingProvider;

/// Embeds `texts` in one provider call and checks that one vector came back
/// per input.
pub async fn embed_texts(
    provider: &dyn EmbeddingProvider,
    texts: &[String],
) -> anyhow::Result<Vec<Vec<f32>>> {
    if texts.is_empty() {
        return Ok(Vec::new());
    }
    let resp = provider.embed(texts).await.context("embedding request")?;
    anyhow::ensure!(
        resp.vectors.len() == texts.len(),
        "embedding provider returned {} vectors for {} inputs",
        resp.vectors.len(),
        texts.len()
    );
    Ok(resp.vectors)
}

pub async fn embed_query(provider: &dyn EmbeddingProvider, query: &str) -> anyhow::Result<Vec<f32>> {
    let mut vectors = embed_texts(provider, &[query.to_string()]).await?;
    vectors
        .pop()
        .context("embedding provider returned no vector for the query")
}
