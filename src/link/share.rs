//! Shareable claim URLs.
//!
//! A created link travels as three query parameters: `i` (index), `p`
//! (seed) and `c` (chain id). The seed is a bearer capability, so whoever
//! receives the URL can claim.

use url::Url;

use crate::link::types::{CreatedLink, LinkError, LinkResult};

impl CreatedLink {
    /// Append the link parameters to `base`.
    pub fn to_url(&self, base: &str) -> LinkResult<Url> {
        let mut url = Url::parse(base).map_err(|e| LinkError::InvalidShareUrl(e.to_string()))?;
        url.query_pairs_mut()
            .append_pair("i", &self.i.to_string())
            .append_pair("p", &self.p)
            .append_pair("c", &self.c.to_string());
        Ok(url)
    }

    /// Read the link parameters back out of a share URL.
    pub fn from_url(url: &str) -> LinkResult<Self> {
        let url = Url::parse(url).map_err(|e| LinkError::InvalidShareUrl(e.to_string()))?;

        let (mut index, mut seed, mut chain) = (None, None, None);
        for (key, value) in url.query_pairs() {
            match key.as_ref() {
                "i" => index = Some(value.into_owned()),
                "p" => seed = Some(value.into_owned()),
                "c" => chain = Some(value.into_owned()),
                _ => {}
            }
        }

        let index = index.ok_or_else(|| LinkError::InvalidShareUrl("missing 'i'".to_string()))?;
        let seed = seed
            .filter(|s| !s.is_empty())
            .ok_or_else(|| LinkError::InvalidShareUrl("missing 'p'".to_string()))?;
        let chain = chain.ok_or_else(|| LinkError::InvalidShareUrl("missing 'c'".to_string()))?;

        Ok(Self {
            i: index
                .parse()
                .map_err(|_| LinkError::InvalidShareUrl(format!("bad index '{}'", index)))?,
            p: seed,
            c: chain
                .parse()
                .map_err(|_| LinkError::InvalidShareUrl(format!("bad chain id '{}'", chain)))?,
        })
    }
}
