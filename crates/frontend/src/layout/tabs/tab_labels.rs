//! Tab labels - единственный источник правды для заголовков табов.

pub const DISPUTE_DETAIL_PREFIX: &str = "a001_dispute_detail_";

/// Заголовок для статических ключей; `None` для неизвестных
pub fn static_label(key: &str) -> Option<&'static str> {
    let label = match key {
        // ── Dashboards ────────────────────────────────────────────────────
        "d400_overview" => "Dashboard",
        "d401_reports" => "Reports",

        // ── Aggregates ────────────────────────────────────────────────────
        "a001_dispute" => "Disputes",
        "a002_user" => "Users",
        "a003_team" => "Teams",
        "a004_venue" => "Venues",
        "a004_venue_unverified" => "Venues to verify",
        "a005_audit_log" => "Audit Logs",

        // ── System ────────────────────────────────────────────────────────
        "sys_test_report" => "Test Report",

        _ => return None,
    };
    Some(label)
}

/// "Dispute #1a2b3c4d": первые 8 символов id
pub fn detail_tab_label(entity: &str, id: &str) -> String {
    let short: String = id.chars().take(8).collect();
    format!("{} #{}", entity, short)
}

/// Возвращает читаемый заголовок таба для данного ключа. Fallback: сам ключ.
pub fn tab_label_for_key(key: &str) -> String {
    if let Some(id) = key.strip_prefix(DISPUTE_DETAIL_PREFIX) {
        return detail_tab_label("Dispute", id);
    }
    static_label(key)
        .map(str::to_string)
        .unwrap_or_else(|| key.to_string())
}

pub fn dispute_detail_key(id: &str) -> String {
    format!("{}{}", DISPUTE_DETAIL_PREFIX, id)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_static_labels() {
        assert_eq!(tab_label_for_key("a001_dispute"), "Disputes");
        assert_eq!(tab_label_for_key("sys_test_report"), "Test Report");
        assert_eq!(tab_label_for_key("unknown_key"), "unknown_key");
    }

    #[test]
    fn test_detail_label() {
        let key = dispute_detail_key("7f3c2a10-aaaa-bbbb");
        assert_eq!(tab_label_for_key(&key), "Dispute #7f3c2a10");
        assert_eq!(detail_tab_label("Dispute", "42"), "Dispute #42");
    }
}
