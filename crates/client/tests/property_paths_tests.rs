//! Property tests for REST path construction.

use happa_client::endpoints::encode_path_segment;
use happa_client::endpoints::paths::{collection_path, object_path};
use happa_client::models::{MachinePool, Release};
use proptest::prelude::*;

proptest! {
    #[test]
    fn encoded_segment_never_contains_separators(segment in "\\PC{0,40}") {
        let encoded = encode_path_segment(&segment);
        prop_assert!(!encoded.contains('/'));
        prop_assert!(!encoded.contains('?'));
        prop_assert!(!encoded.contains('#'));
    }

    #[test]
    fn object_path_extends_collection_path(
        namespace in "[a-z0-9-]{1,20}",
        name in "[a-z0-9.-]{1,30}",
    ) {
        let collection = collection_path::<MachinePool>(Some(&namespace));
        let object = object_path::<MachinePool>(Some(&namespace), &name);
        prop_assert!(object.starts_with(&collection));
        let namespace_segment = format!("/namespaces/{namespace}/");
        prop_assert!(collection.contains(&namespace_segment));
    }

    #[test]
    fn cluster_scoped_paths_ignore_namespace(namespace in "[a-z0-9-]{1,20}") {
        prop_assert_eq!(
            collection_path::<Release>(Some(&namespace)),
            collection_path::<Release>(None)
        );
    }
}
