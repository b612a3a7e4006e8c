//! # Deep Links
//!
//! Builds the app-install link that merchant QR posters encode.
//!
//! ## Link Anatomy
//! ```text
//! https://tiffinwala.page.link/?link=<enc(deep)>&apn=…&ibi=…&ofl=<enc(fallback)>&efr=1
//!                                      │
//!                                      └── https://tiffinwala.services/open?merchantId=<enc(id)>
//!
//! apn  Android package      ibi  iOS bundle id
//! ofl  fallback (store)     efr  1 = skip the preview page
//! ```

use serde::{Deserialize, Serialize};

/// Parameters of the dynamic link wrapper.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DeepLinkConfig {
    pub link_domain: String,
    pub deep_link_base: String,
    pub android_package: String,
    pub ios_bundle: String,
    pub fallback_url: String,
    pub skip_preview: bool,
}

impl Default for DeepLinkConfig {
    fn default() -> Self {
        DeepLinkConfig {
            link_domain: "https://tiffinwala.page.link/".to_string(),
            deep_link_base: "https://tiffinwala.services/open".to_string(),
            android_package: "com.tiffinwala.app".to_string(),
            ios_bundle: "com.tiffinwala.ios".to_string(),
            fallback_url: "https://play.google.com/store/apps/details?id=com.tiffinwala.app"
                .to_string(),
            skip_preview: true,
        }
    }
}

/// Builds the dynamic link for one merchant.
///
/// ## Example
/// ```rust
/// use tiffin_core::deeplink::{merchant_link, DeepLinkConfig};
///
/// let link = merchant_link(&DeepLinkConfig::default(), "M 1");
/// assert!(link.starts_with(
///     "https://tiffinwala.page.link/?link=https%3A%2F%2Ftiffinwala.services%2Fopen%3FmerchantId%3DM%25201"
/// ));
/// assert!(link.ends_with("&efr=1"));
/// ```
pub fn merchant_link(cfg: &DeepLinkConfig, merchant_id: &str) -> String {
    let deep = format!("{}?merchantId={}", cfg.deep_link_base, encode_component(merchant_id));

    let mut link = format!(
        "{}?link={}&apn={}&ibi={}&ofl={}",
        cfg.link_domain,
        encode_component(&deep),
        cfg.android_package,
        cfg.ios_bundle,
        encode_component(&cfg.fallback_url),
    );
    if cfg.skip_preview {
        link.push_str("&efr=1");
    }
    link
}

/// File name of a downloaded poster. The id is reduced to a single safe
/// path segment first, see [`file_safe_id`].
pub fn poster_file_name(merchant_id: &str) -> String {
    format!("merchant-qr-{}.png", file_safe_id(merchant_id))
}

/// Maps anything outside `[A-Za-z0-9._-]` to `_` and never yields an empty
/// string, `.`, `..` or a leading dot.
pub fn file_safe_id(raw: &str) -> String {
    let mut safe: String = raw
        .chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() || matches!(c, '.' | '_' | '-') {
                c
            } else {
                '_'
            }
        })
        .collect();

    if safe.starts_with('.') {
        safe.replace_range(..1, "_");
    }
    if safe.is_empty() {
        safe.push('_');
    }
    safe
}

/// Percent-encodes like JavaScript's `encodeURIComponent`, which leaves
/// `! ' ( ) *` as they are.
pub fn encode_component(raw: &str) -> String {
    urlencoding::encode(raw)
        .replace("%21", "!")
        .replace("%27", "'")
        .replace("%28", "(")
        .replace("%29", ")")
        .replace("%2A", "*")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_full_default_link() {
        let link = merchant_link(&DeepLinkConfig::default(), "TW-0042");
        assert_eq!(
            link,
            "https://tiffinwala.page.link/?link=https%3A%2F%2Ftiffinwala.services%2Fopen%3FmerchantId%3DTW-0042\
             &apn=com.tiffinwala.app&ibi=com.tiffinwala.ios\
             &ofl=https%3A%2F%2Fplay.google.com%2Fstore%2Fapps%2Fdetails%3Fid%3Dcom.tiffinwala.app\
             &efr=1"
        );
    }

    #[test]
    fn test_preview_flag() {
        let cfg = DeepLinkConfig {
            skip_preview: false,
            ..Default::default()
        };
        assert!(!merchant_link(&cfg, "x").contains("efr"));
    }

    #[test]
    fn test_encode_component_matches_js() {
        assert_eq!(encode_component("a b&c/d"), "a%20b%26c%2Fd");
        assert_eq!(encode_component("it's (ok)!*~"), "it's (ok)!*~");
        assert_eq!(encode_component("चाय"), "%E0%A4%9A%E0%A4%BE%E0%A4%AF");
    }

    #[test]
    fn test_poster_file_name() {
        assert_eq!(poster_file_name("TW-0042"), "merchant-qr-TW-0042.png");
    }

    #[test]
    fn test_poster_file_name_stays_in_output_dir() {
        assert_eq!(poster_file_name("a/b"), "merchant-qr-a_b.png");
        assert_eq!(poster_file_name("../x"), "merchant-qr-_._x.png");
        assert_eq!(poster_file_name("a\\b c"), "merchant-qr-a_b_c.png");
        assert_eq!(poster_file_name(""), "merchant-qr-_.png");

        let out = std::path::Path::new("/tmp/posters");
        for id in ["x/../../etc/evil", "..", ".", "/abs", "..\\win"] {
            let joined = out.join(poster_file_name(id));
            assert_eq!(joined.parent(), Some(out), "{id}");
            assert!(joined
                .components()
                .all(|c| !matches!(c, std::path::Component::ParentDir)));
        }
    }

    #[test]
    fn test_file_safe_id_rejects_dot_names() {
        assert_eq!(file_safe_id("."), "_");
        assert_eq!(file_safe_id(".."), "_.");
        assert_eq!(file_safe_id(".hidden"), "_hidden");
        assert_eq!(file_safe_id("TW.1_a-b"), "TW.1_a-b");
    }
}
