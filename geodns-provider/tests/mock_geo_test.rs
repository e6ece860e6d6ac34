//! In-memory provider geo listings

mod common;

use std::sync::Arc;
use std::thread;

use common::*;
use geodns_provider::{
    BackendConfig, GeoConfig, MockStore, ProviderError, RData, ResourceRecordSetWithConfig,
    create_provider,
};

#[test]
fn test_list_sorted_and_complete() {
    let geo = mock_geo();
    let records = require_ok!(collect(geo.list().unwrap()));

    assert_eq!(
        render(&records),
        vec![
            "www.geo.denominator.io. CNAME 0 [{cname=c.denominator.io.}] geo(group=antarctica, territories=[Bouvet Island, French Southern Territories, Antarctica])",
            "www.geo.denominator.io. CNAME 300 [{cname=a.denominator.io.}] geo(group=alazona, territories=[Alaska, Arizona])",
            "www.geo.denominator.io. CNAME 86400 [{cname=b.denominator.io.}] geo(group=columbador, territories=[Colombia, Ecuador])",
            "www2.geo.denominator.io. A 300 [{address=192.0.2.1}] geo(group=alazona, territories=[Alaska, Arizona])",
        ]
    );
}

#[test]
fn test_listings_are_stable() {
    let geo = mock_geo();
    let first = render(&require_ok!(collect(geo.list().unwrap())));
    let second = render(&require_ok!(collect(geo.list().unwrap())));
    assert_eq!(first, second);
}

#[test]
fn test_list_by_name_ignores_case_and_trailing_dot() {
    let geo = mock_geo();
    let records = require_ok!(collect(geo.list_by_name("WWW.Geo.Denominator.IO").unwrap()));
    assert_eq!(records.len(), 3);
    assert!(records.iter().all(|r| r.name() == GEO_NAME));
}

#[test]
fn test_list_by_name_and_type() {
    let geo = mock_geo();

    let cnames = require_ok!(collect(
        geo.list_by_name_and_type(GEO_NAME, "CNAME").unwrap()
    ));
    let groups: Vec<&str> = cnames
        .iter()
        .filter_map(|r| r.geo().map(|g| g.group_name.as_str()))
        .collect();
    assert_eq!(groups, vec!["antarctica", "alazona", "columbador"]);

    let addresses = require_ok!(collect(geo.list_by_name_and_type(GEO_NAME, "A").unwrap()));
    assert!(addresses.is_empty());
}

#[test]
fn test_get_by_name_type_and_group() {
    let geo = mock_geo();

    let found = require_some!(require_ok!(geo.get_by_name_type_and_group(
        GEO_NAME, "CNAME", "alazona"
    )));
    assert_eq!(found.rrset.ttl, Some(300));
    assert_eq!(
        found.geo().map(|g| g.territories.clone()),
        Some(vec!["Alaska".to_string(), "Arizona".to_string()])
    );

    let missing = require_ok!(geo.get_by_name_type_and_group(GEO_NAME, "CNAME", "nowhere"));
    assert!(missing.is_none());
}

#[test]
fn test_unknown_zone_names_the_zone() {
    let result = mock_provider().geo_api_for_zone("nowhere.io.");
    let Err(err) = result else {
        panic!("unknown zone must fail");
    };
    assert!(matches!(err, ProviderError::ZoneNotFound { .. }));
    assert!(err.to_string().contains("nowhere.io."));
    assert!(err.is_expected());
}

#[test]
fn test_blank_arguments_rejected() {
    let geo = mock_geo();
    assert!(matches!(
        geo.list_by_name("  "),
        Err(ProviderError::InvalidArgument { ref param, .. }) if param == "name"
    ));
    assert!(matches!(
        geo.get_by_name_type_and_group(GEO_NAME, "CNAME", ""),
        Err(ProviderError::InvalidArgument { ref param, .. }) if param == "group"
    ));
}

#[test]
fn test_every_listed_record_has_geo_config() {
    let geo = mock_geo();
    for record in require_ok!(collect(geo.list().unwrap())) {
        let config = require_some!(record.geo());
        assert!(!config.group_name.is_empty());
        assert_eq!(config.no_response, record.rrset.rdata.is_empty());
    }
}

fn address(value: &str) -> RData {
    RData::from([("address".to_string(), serde_json::json!(value))])
}

#[test]
fn test_concurrent_readers_and_writer() {
    let store = Arc::new(require_ok!(MockStore::seeded()));
    let provider = create_provider(
        BackendConfig::Mock {
            store: Arc::clone(&store),
        },
        None,
    )
    .unwrap();
    let geo = require_some!(provider.geo_api_for_zone(ZONE).unwrap());

    thread::scope(|scope| {
        for _ in 0..8 {
            let geo = Arc::clone(&geo);
            scope.spawn(move || {
                for _ in 0..50 {
                    let records: Vec<ResourceRecordSetWithConfig> =
                        geo.list().unwrap().collect::<Result<_, _>>().unwrap();
                    assert!(records.len() >= 4);
                }
            });
        }
        scope.spawn(|| {
            for i in 0..20 {
                let rrset = ResourceRecordSetWithConfig::builder()
                    .name(format!("host{i}.geo.denominator.io."))
                    .record_type("A")
                    .ttl(Some(60))
                    .add(address("192.0.2.10"))
                    .geo(GeoConfig::new("alazona", vec!["Alaska".to_string()]))
                    .build()
                    .unwrap();
                store.put(ZONE, rrset).unwrap();
            }
        });
    });

    let records = require_ok!(collect(geo.list().unwrap()));
    assert_eq!(records.len(), 24);
}
