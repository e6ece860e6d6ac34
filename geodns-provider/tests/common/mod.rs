//! 共享测试工具和辅助函数

#![allow(dead_code)]

use std::collections::BTreeMap;
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

use geodns_provider::{
    BackendConfig, Credentials, DirectionalGroupCoordinates, DirectionalPool, DirectionalPoolApi,
    DirectionalRecordType, DnsProvider, GeoRecordSet, GeoRegionGroup, GeoResourceRecordSetApi,
    GeoService, InMemoryDirectionalPools, InMemoryGeoServices, MockStore, Node, Result,
    ResourceRecordSetWithConfig, create_provider,
    geo::{DirectionalGroup, DirectionalRecord, RegionIndex},
};

pub const ZONE: &str = "denominator.io.";
pub const GEO_NAME: &str = "www.geo.denominator.io.";
pub const SRV_NAME: &str = "srv.denominator.io.";

/// 断言 `Option` 为 `Some`，并解包返回内部值（失败则直接让测试失败）。
#[macro_export]
macro_rules! require_some {
    ($expr:expr $(,)?) => {{
        let opt = $expr;
        assert!(opt.is_some(), "expected Some(..), got None");
        let Some(val) = opt else {
            return;
        };
        val
    }};
    ($expr:expr, $($msg:tt)+) => {{
        let opt = $expr;
        assert!(opt.is_some(), "{}", format_args!($($msg)+));
        let Some(val) = opt else {
            return;
        };
        val
    }};
}

/// 断言 `Result` 为 `Ok`，并解包返回内部值（失败则直接让测试失败）。
#[macro_export]
macro_rules! require_ok {
    ($expr:expr $(,)?) => {{
        let res = $expr;
        assert!(res.is_ok(), "expected Ok(..), got {res:?}");
        let Ok(val) = res else {
            return;
        };
        val
    }};
    ($expr:expr, $($msg:tt)+) => {{
        let res = $expr;
        assert!(
            res.is_ok(),
            "{}: {res:?}",
            format_args!($($msg)+)
        );
        let Ok(val) = res else {
            return;
        };
        val
    }};
}

/// 南极洲区域：单独出现时展开为所属国家
pub fn regions() -> Arc<RegionIndex> {
    Arc::new(RegionIndex::new(BTreeMap::from([(
        "Antarctica".to_string(),
        vec![
            "Bouvet Island".to_string(),
            "French Southern Territories".to_string(),
            "Antarctica".to_string(),
        ],
    )])))
}

/// 收集迭代结果，遇到错误直接返回
pub fn collect(iter: geodns_provider::GeoRecordIter<'_>) -> Result<Vec<ResourceRecordSetWithConfig>> {
    iter.collect()
}

/// 将记录集渲染为字符串，便于整体断言
pub fn render(records: &[ResourceRecordSetWithConfig]) -> Vec<String> {
    records.iter().map(ToString::to_string).collect()
}

// ============ Mock ============

pub fn mock_provider() -> Arc<dyn DnsProvider> {
    let store = Arc::new(MockStore::seeded().unwrap());
    create_provider(BackendConfig::Mock { store }, None).unwrap()
}

pub fn mock_geo() -> Arc<dyn GeoResourceRecordSetApi> {
    mock_provider().geo_api_for_zone(ZONE).unwrap().unwrap()
}

// ============ 目录池 (ultradns) ============

pub fn group_id(group: &str) -> String {
    format!("grp-{}", group.to_lowercase().replace(' ', "-"))
}

pub fn directional(
    name: &str,
    record_type: &str,
    ttl: u32,
    group: &str,
    rdata: &[&str],
) -> DirectionalRecord {
    DirectionalRecord {
        name: name.to_string(),
        record_type: record_type.to_string(),
        ttl: Some(ttl),
        rdata: rdata.iter().map(ToString::to_string).collect(),
        no_response: false,
        geolocation_group: Some(DirectionalGroup::new(group_id(group), group)),
        group: None,
    }
}

pub fn no_response(name: &str, record_type: &str, ttl: u32, group: &str) -> DirectionalRecord {
    DirectionalRecord {
        rdata: Vec::new(),
        no_response: true,
        ..directional(name, record_type, ttl, group, &[])
    }
}

/// `www.geo` 在 IPV4/IPV6 桶中混有 CNAME 与地址记录，行顺序故意打乱
pub fn directional_pools() -> InMemoryDirectionalPools {
    let pools = InMemoryDirectionalPools::new();
    pools.add_zone(ZONE);

    let ipv4 = [
        directional(GEO_NAME, "A", 60, "Everywhere Else", &["192.0.2.2"]),
        directional(GEO_NAME, "CNAME", 300, "US", &["www-us.denominator.io."]),
        directional(GEO_NAME, "A", 60, "Everywhere Else", &["192.0.2.1"]),
        directional(GEO_NAME, "CNAME", 300, "Europe", &["www-eu.denominator.io."]),
    ];
    for row in ipv4 {
        pools.add_record(ZONE, DirectionalRecordType::Ipv4, row).unwrap();
    }

    let ipv6 = [
        no_response(GEO_NAME, "CNAME", 300, "Antarctica"),
        directional(GEO_NAME, "AAAA", 60, "Everywhere Else", &["2001:db8::1"]),
    ];
    for row in ipv6 {
        pools.add_record(ZONE, DirectionalRecordType::Ipv6, row).unwrap();
    }

    pools
        .add_record(
            ZONE,
            DirectionalRecordType::Mx,
            directional(
                "mail.denominator.io.",
                "MX",
                3600,
                "Europe",
                &["10", "mx-eu.denominator.io."],
            ),
        )
        .unwrap();

    // source-ip 池不参与 geo 列表
    pools
        .add_pool(
            ZONE,
            DirectionalPool {
                name: "sourceip.denominator.io.".to_string(),
                kind: geodns_provider::PoolKind::SourceIp,
            },
        )
        .unwrap();

    for (group, territories) in [
        ("Everywhere Else", vec!["Anonymous Proxy", "Satellite Provider"]),
        ("US", vec!["Alabama", "Alaska"]),
        ("Europe", vec!["Albania", "Andorra"]),
        ("Antarctica", vec!["Antarctica"]),
    ] {
        pools.set_territories(
            &group_id(group),
            territories.into_iter().map(String::from).collect(),
        );
    }
    pools
}

/// 统计 territory 加载次数的包装
#[derive(Debug)]
pub struct CountingPools {
    pub inner: InMemoryDirectionalPools,
    pub territory_loads: AtomicUsize,
}

impl CountingPools {
    pub fn new(inner: InMemoryDirectionalPools) -> Self {
        Self {
            inner,
            territory_loads: AtomicUsize::new(0),
        }
    }

    pub fn loads(&self) -> usize {
        self.territory_loads.load(Ordering::SeqCst)
    }
}

impl DirectionalPoolApi for CountingPools {
    fn zone_exists(&self, zone: &str) -> Result<bool> {
        self.inner.zone_exists(zone)
    }

    fn list_pools(&self, zone: &str) -> Result<Vec<DirectionalPool>> {
        self.inner.list_pools(zone)
    }

    fn list_records_by_name_and_type(
        &self,
        zone: &str,
        name: &str,
        bucket: DirectionalRecordType,
    ) -> Result<Vec<DirectionalRecord>> {
        self.inner.list_records_by_name_and_type(zone, name, bucket)
    }

    fn list_records_by_group(
        &self,
        coordinates: &DirectionalGroupCoordinates,
    ) -> Result<Vec<DirectionalRecord>> {
        self.inner.list_records_by_group(coordinates)
    }

    fn territories_for_group_id(&self, group_id: &str) -> Result<Vec<String>> {
        self.territory_loads.fetch_add(1, Ordering::SeqCst);
        self.inner.territories_for_group_id(group_id)
    }
}

pub fn ultradns_credentials() -> Credentials {
    Credentials::list(["joe", "letmein"])
}

pub fn ultradns_provider(api: Arc<dyn DirectionalPoolApi>) -> Arc<dyn DnsProvider> {
    create_provider(
        BackendConfig::Ultradns {
            api,
            regions: regions(),
        },
        Some(&ultradns_credentials()),
    )
    .unwrap()
}

pub fn ultradns_geo(api: Arc<dyn DirectionalPoolApi>) -> Arc<dyn GeoResourceRecordSetApi> {
    ultradns_provider(api)
        .geo_api_for_zone(ZONE)
        .unwrap()
        .unwrap()
}

// ============ 地理服务 (dynect) ============

fn values(values: &[&[&str]]) -> Vec<Vec<String>> {
    values
        .iter()
        .map(|v| v.iter().map(ToString::to_string).collect())
        .collect()
}

/// 一个服务，三个区域组；`Fallback` 无应答且只覆盖南极洲区域
pub fn geo_services() -> InMemoryGeoServices {
    let services = InMemoryGeoServices::new();
    services.add_zone(ZONE);
    services.add_zone("other.io.");
    services
        .put_service(GeoService {
            name: "CCS".to_string(),
            nodes: vec![Node::new(ZONE, SRV_NAME), Node::new("other.io.", "srv.other.io.")],
            groups: vec![
                GeoRegionGroup {
                    name: "Everywhere Else".to_string(),
                    countries: vec!["Anonymous Proxy".to_string(), "Satellite Provider".to_string()],
                    record_sets: vec![GeoRecordSet {
                        record_type: "A".to_string(),
                        ttl: Some(300),
                        values: values(&[&["192.0.2.1"], &["192.0.2.2"]]),
                    }],
                },
                GeoRegionGroup {
                    name: "Europe".to_string(),
                    countries: vec!["Albania".to_string(), "Andorra".to_string()],
                    record_sets: vec![GeoRecordSet {
                        record_type: "CNAME".to_string(),
                        ttl: Some(300),
                        values: values(&[&["srv-eu.denominator.io."]]),
                    }],
                },
                GeoRegionGroup {
                    name: "Fallback".to_string(),
                    countries: vec!["Antarctica".to_string()],
                    record_sets: vec![GeoRecordSet {
                        record_type: "A".to_string(),
                        ttl: Some(300),
                        values: Vec::new(),
                    }],
                },
            ],
        })
        .unwrap();
    services
}

pub fn dynect_credentials() -> Credentials {
    Credentials::list(["customer", "joe", "letmein"])
}

pub fn dynect_geo() -> Arc<dyn GeoResourceRecordSetApi> {
    create_provider(
        BackendConfig::Dynect {
            api: Arc::new(geo_services()),
            regions: regions(),
        },
        Some(&dynect_credentials()),
    )
    .unwrap()
    .geo_api_for_zone(ZONE)
    .unwrap()
    .unwrap()
}
