//! Provider 公共工具函数

use crate::error::{ProviderError, Result};
use crate::traits::GeoRecordIter;
use crate::types::ResourceRecordSetWithConfig;

// ============ 参数校验 ============

/// 必填参数不能为空
pub fn require_non_empty<'a>(provider: &str, param: &str, value: &'a str) -> Result<&'a str> {
    if value.trim().is_empty() {
        Err(ProviderError::invalid_argument(
            provider,
            param,
            "must not be empty",
        ))
    } else {
        Ok(value)
    }
}

/// 记录类型统一为大写
pub fn normalize_record_type(provider: &str, record_type: &str) -> Result<String> {
    Ok(require_non_empty(provider, "type", record_type)?.to_ascii_uppercase())
}

// ============ 记录类型 ============

/// 记录类型对应的数值代码 (RFC 1035 及后续)
pub fn record_type_code(record_type: &str) -> Option<u16> {
    match record_type {
        "A" => Some(1),
        "NS" => Some(2),
        "CNAME" => Some(5),
        "PTR" => Some(12),
        "MX" => Some(15),
        "TXT" => Some(16),
        "AAAA" => Some(28),
        "SRV" => Some(33),
        "NAPTR" => Some(35),
        "SPF" => Some(99),
        _ => None,
    }
}

// ============ 域名名称处理 ============

/// 去掉域名末尾的点
pub fn normalize_domain_name(name: &str) -> &str {
    name.trim_end_matches('.')
}

/// 比较两个域名（忽略大小写与末尾的点）
pub fn names_equal(a: &str, b: &str) -> bool {
    normalize_domain_name(a).eq_ignore_ascii_case(normalize_domain_name(b))
}

// ============ 结果序列 ============

/// 按可打印形式排序，保证多次列出的顺序一致
pub fn sort_by_display(records: &mut [ResourceRecordSetWithConfig]) {
    records.sort_by_cached_key(ToString::to_string);
}

/// 遇到第一个错误后停止
pub fn stop_after_error<'a>(
    iter: impl Iterator<Item = Result<ResourceRecordSetWithConfig>> + 'a,
) -> GeoRecordIter<'a> {
    Box::new(iter.scan(false, |failed, item| {
        if *failed {
            return None;
        }
        *failed = item.is_err();
        Some(item)
    }))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn names_ignore_case_and_trailing_dot() {
        assert!(names_equal("WWW.denominator.io.", "www.denominator.io"));
        assert!(!names_equal("www.denominator.io.", "www2.denominator.io."));
    }

    #[test]
    fn record_type_is_uppercased() {
        assert_eq!(normalize_record_type("t", "cname").unwrap(), "CNAME");
        assert!(normalize_record_type("t", " ").is_err());
    }

    #[test]
    fn type_codes() {
        assert_eq!(record_type_code("AAAA"), Some(28));
        assert_eq!(record_type_code("LOC"), None);
    }

    #[test]
    fn stops_after_first_error() {
        let items: Vec<Result<ResourceRecordSetWithConfig>> = vec![
            Err(ProviderError::contract_violation("t", "first")),
            Err(ProviderError::contract_violation("t", "second")),
        ];
        let out: Vec<_> = stop_after_error(items.into_iter()).collect();
        assert_eq!(out.len(), 1);
    }
}
