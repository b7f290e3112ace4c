//! `aipseo lookup` and `aipseo spam-score`

use crate::context::Context;
use crate::error::Result;

/// Strip the scheme and one trailing slash from a URL
pub fn normalize_url(url: &str) -> &str {
    let url = url
        .strip_prefix("http://")
        .or_else(|| url.strip_prefix("https://"))
        .unwrap_or(url);
    url.strip_suffix('/').unwrap_or(url)
}

pub async fn lookup(ctx: &mut Context, url: &str) -> Result<()> {
    let response = ctx.api.lookup(normalize_url(url)).await;
    ctx.output.render(&response)
}

pub async fn spam_score(ctx: &mut Context, url: &str) -> Result<()> {
    let response = ctx.api.spam_score(normalize_url(url)).await;
    ctx.output.render(&response)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_url() {
        assert_eq!(normalize_url("example.com"), "example.com");
        assert_eq!(normalize_url("https://example.com"), "example.com");
        assert_eq!(normalize_url("http://example.com/"), "example.com");
        assert_eq!(normalize_url("https://example.com/blog/"), "example.com/blog");
        assert_eq!(normalize_url("ftp://example.com"), "ftp://example.com");
    }
}
