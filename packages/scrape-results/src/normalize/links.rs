use crate::error::{NormalizeError, Result};
use crate::types::{LinkRecord, LinkStatus, RawLink};

/// Convert a raw link into a canonical record.
///
/// Unknown follow flags become `false` and unknown statuses become
/// [`LinkStatus::default`]. Status codes outside `1..=65535` (scrapers use
/// `-1` for failed fetches) count as unknown. Anchor text absence is kept as
/// `None`.
pub fn normalize_link(raw: &RawLink) -> Result<LinkRecord> {
    let url = match raw.link_url.as_deref() {
        Some(url) if !url.trim().is_empty() => url.to_string(),
        _ => {
            return Err(NormalizeError::MissingField {
                location: String::new(),
                field: "linkUrl",
            })
        }
    };

    let status = raw
        .status
        .as_ref()
        .map(|status| LinkStatus {
            code: status
                .code
                .and_then(|code| u16::try_from(code).ok())
                .unwrap_or(LinkStatus::UNKNOWN_CODE),
            redirect_url: status.redirect_url.clone().unwrap_or_default(),
        })
        .unwrap_or_default();

    Ok(LinkRecord {
        url,
        anchor_text: raw.anchor_text.clone(),
        is_follow: raw.is_follow.unwrap_or(false),
        status,
    })
}

/// Normalize a link list in order. Absent lists become empty.
///
/// Error locations are relative to the list, e.g. `[3]`.
pub fn normalize_links(raw: Option<&[RawLink]>) -> Result<Vec<LinkRecord>> {
    raw.unwrap_or_default()
        .iter()
        .enumerate()
        .map(|(index, link)| normalize_link(link).map_err(|e| e.within(&format!("[{index}]"))))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::RawLinkStatus;

    #[test]
    fn test_full_link_copied() {
        let raw = RawLink::new("https://example.com/a")
            .with_anchor_text("About")
            .with_follow(true)
            .with_status(301, "https://example.com/about");

        let link = normalize_link(&raw).unwrap();

        assert_eq!(
            link,
            LinkRecord {
                url: "https://example.com/a".into(),
                anchor_text: Some("About".into()),
                is_follow: true,
                status: LinkStatus {
                    code: 301,
                    redirect_url: "https://example.com/about".into(),
                },
            }
        );
    }

    #[test]
    fn test_defaults_for_unknown_fields() {
        let link = normalize_link(&RawLink::new("https://example.com")).unwrap();

        assert!(!link.is_follow);
        assert_eq!(link.anchor_text, None);
        assert_eq!(
            link.status,
            LinkStatus {
                code: 0,
                redirect_url: String::new()
            }
        );
    }

    #[test]
    fn test_partial_status_fields_defaulted() {
        let raw = RawLink {
            link_url: Some("https://example.com".into()),
            status: Some(RawLinkStatus {
                code: Some(200),
                redirect_url: None,
            }),
            ..Default::default()
        };

        let link = normalize_link(&raw).unwrap();

        assert_eq!(link.status.code, 200);
        assert_eq!(link.status.redirect_url, "");
    }

    #[test]
    fn test_out_of_range_status_code_is_unknown() {
        for code in [-1, 65_536, i64::MAX] {
            let raw = RawLink {
                link_url: Some("https://example.com".into()),
                status: Some(RawLinkStatus {
                    code: Some(code),
                    redirect_url: Some("https://example.com/next".into()),
                }),
                ..Default::default()
            };

            let link = normalize_link(&raw).unwrap();

            assert!(!link.status.is_known(), "code {code}");
            assert_eq!(link.status.redirect_url, "https://example.com/next");
        }
    }

    #[test]
    fn test_empty_anchor_text_differs_from_absent() {
        let empty = normalize_link(&RawLink::new("https://example.com").with_anchor_text("")).unwrap();
        let absent = normalize_link(&RawLink::new("https://example.com")).unwrap();

        assert_eq!(empty.anchor_text.as_deref(), Some(""));
        assert_eq!(absent.anchor_text, None);
        assert_ne!(empty, absent);
    }

    #[test]
    fn test_missing_url_rejected() {
        let err = normalize_link(&RawLink::default()).unwrap_err();
        assert!(matches!(err, NormalizeError::MissingField { field: "linkUrl", .. }));
    }

    #[test]
    fn test_list_preserves_order_and_reports_index() {
        let raw = vec![
            RawLink::new("https://a.test"),
            RawLink::new("https://b.test"),
            RawLink::new("https://c.test"),
        ];
        let urls: Vec<String> = normalize_links(Some(&raw))
            .unwrap()
            .into_iter()
            .map(|l| l.url)
            .collect();
        assert_eq!(urls, vec!["https://a.test", "https://b.test", "https://c.test"]);

        let broken = vec![RawLink::new("https://a.test"), RawLink::new("   ")];
        assert_eq!(
            normalize_links(Some(&broken)).unwrap_err(),
            NormalizeError::MissingField {
                location: "[1]".into(),
                field: "linkUrl",
            }
        );
    }

    #[test]
    fn test_absent_list_is_empty() {
        assert!(normalize_links(None).unwrap().is_empty());
    }
}
