use genoflake::{
    CoordinateSource, DATACENTER_ENV, Gene, NODE_ENV, SystemEnv, SystemHost, bootstrap_node,
    default_node, must_generate_id, resolve_coordinates,
};

#[test]
fn default_node_falls_back_to_host_fingerprint() {
    // SAFETY: the only test in this binary, run before any other thread reads
    // the environment.
    unsafe {
        std::env::remove_var(DATACENTER_ENV);
        std::env::set_var(NODE_ENV, "9");
    }

    let (expected, source) = resolve_coordinates(&SystemEnv, &SystemHost);
    assert_eq!(source, CoordinateSource::Fingerprint);

    let node = default_node().unwrap();
    assert_eq!(node.datacenter(), expected.datacenter);
    assert_eq!(node.node(), expected.node);
    assert!((0..=7).contains(&node.datacenter()));
    assert!((0..=7).contains(&node.node()));

    let again = bootstrap_node(&SystemEnv, &SystemHost).unwrap();
    assert_eq!(again.datacenter(), node.datacenter());
    assert_eq!(again.node(), node.node());

    let id = must_generate_id(Gene::SESSION);
    assert_eq!(id.gene(), Gene::SESSION);
    assert_eq!(id.datacenter(), node.datacenter());
}
