//! Create-and-converge flows against scripted capability clients.

mod common;

use common::{MockCloud, session};
use skyfleet_cloud::{
    ImageSource, ImageSpec, Named, Observation, ServerSpec, StackSpec, VolumeInfo, VolumeSpec,
};
use skyfleet_core::codes::{compute, image, storage};
use skyfleet_core::ops;
use std::collections::VecDeque;
use std::sync::Arc;

fn obs(name: &str, id: &str, status: &str) -> Observation {
    Observation {
        id: id.to_string(),
        name: name.to_string(),
        status: status.to_string(),
    }
}

fn vol(name: &str, status: &str) -> VolumeInfo {
    VolumeInfo {
        id: format!("vol-{name}"),
        name: name.to_string(),
        status: status.to_string(),
        size_gb: 4,
    }
}

fn server_spec() -> ServerSpec {
    ServerSpec {
        name: "svr1".to_string(),
        image: "centos7".to_string(),
        flavor: "m1medium".to_string(),
        network: "newnet".to_string(),
    }
}

fn catalog() -> MockCloud {
    let mut mock = MockCloud::default();
    mock.networks = vec![Named::new("newnet", "net-1")];
    mock.flavors = vec![Named::new("m1medium", "flv-3")];
    mock.boot_images = vec![Named::new("centos7", "img-7")];
    mock
}

#[tokio::test(start_paused = true)]
async fn server_create_converges_to_active() {
    let mut mock = catalog();
    mock.server_states = std::sync::Mutex::new(VecDeque::from([
        None,
        Some(obs("svr1", "srv-svr1", "BUILD")),
        Some(obs("svr1", "srv-svr1", "ACTIVE")),
    ]));
    let sess = session(Arc::new(mock));

    let server = ops::create_server(&sess, &server_spec(), false).await.unwrap();
    assert_eq!(server.id, "srv-svr1");
    assert!(server.status_is("active"));
}

#[tokio::test]
async fn server_create_aborts_when_reference_cannot_be_mapped() {
    let mut mock = catalog();
    mock.flavors.clear();
    let sess = session(Arc::new(mock));

    let err = ops::create_server(&sess, &server_spec(), false).await.unwrap_err();
    assert_eq!(err.code, compute::FAILED_NAME_TO_ID_MAP);
}

#[tokio::test]
async fn server_create_rejects_duplicate_name_when_unique() {
    let mut mock = catalog();
    mock.servers = vec![Named::new("svr1", "srv-old")];
    let sess = session(Arc::new(mock));

    let err = ops::create_server(&sess, &server_spec(), true).await.unwrap_err();
    assert_eq!(err.code, compute::FAILED_DUPLICATE_SERVER_NAME);
}

#[tokio::test(start_paused = true)]
async fn volume_create_waits_for_available() {
    let mock = MockCloud {
        volume_snapshots: std::sync::Mutex::new(VecDeque::from([
            Vec::new(),
            vec![vol("fub", "creating")],
            vec![vol("fub", "creating")],
            vec![vol("fub", "available")],
        ])),
        ..Default::default()
    };
    let sess = session(Arc::new(mock));

    let spec = VolumeSpec {
        name: "fub".to_string(),
        size_gb: Some(4),
        description: Some("testing vol create".to_string()),
        metadata: Default::default(),
    };

    let created = ops::create_volume(&sess, &spec, false).await.unwrap();
    assert_eq!(created.id, "vol-fub");
}

#[tokio::test]
async fn volume_create_rejects_duplicate_without_force() {
    let mock = MockCloud {
        volume_snapshots: std::sync::Mutex::new(VecDeque::from([vec![vol("fub", "available")]])),
        ..Default::default()
    };
    let sess = session(Arc::new(mock));

    let spec = VolumeSpec {
        name: "fub".to_string(),
        size_gb: None,
        description: None,
        metadata: Default::default(),
    };

    let err = ops::create_volume(&sess, &spec, false).await.unwrap_err();
    assert_eq!(err.code, storage::FAILED_DUPLICATE_VOLUME_NAME);
}

#[tokio::test(start_paused = true)]
async fn image_create_polls_listing_while_upload_runs() {
    let mock = MockCloud {
        image_snapshots: std::sync::Mutex::new(VecDeque::from([
            Vec::new(),
            Vec::new(),
            vec![obs("IMG_TEST", "img-1", "queued")],
            vec![obs("IMG_TEST", "img-1", "active")],
        ])),
        ..Default::default()
    };
    let sess = session(Arc::new(mock));

    let spec = ImageSpec::new("IMG_TEST", ImageSource::Data(vec![0x51, 0x46, 0x49]));
    let observed = ops::create_image(&sess, spec).await.unwrap();
    assert_eq!(observed.id, "img-1");
    assert!(observed.status_is("active"));
}

#[tokio::test]
async fn image_create_rejects_duplicate_name() {
    let mock = MockCloud {
        image_snapshots: std::sync::Mutex::new(VecDeque::from([vec![obs(
            "img_test",
            "img-0",
            "active",
        )]])),
        ..Default::default()
    };
    let sess = session(Arc::new(mock));

    let spec = ImageSpec::new("IMG_TEST", ImageSource::Data(vec![1]));
    let err = ops::create_image(&sess, spec).await.unwrap_err();
    assert_eq!(err.code, image::DUPLICATE_IMAGE_NAME);
}

#[tokio::test(start_paused = true)]
async fn stack_create_waits_for_create_complete() {
    let mock = MockCloud {
        stack_snapshots: std::sync::Mutex::new(VecDeque::from([
            vec![obs("teststack", "stk-1", "CREATE_IN_PROGRESS")],
            vec![obs("teststack", "stk-1", "CREATE_COMPLETE")],
        ])),
        ..Default::default()
    };
    let sess = session(Arc::new(mock));

    let spec = StackSpec {
        name: "teststack".to_string(),
        template: "heat_template_version: 2015-04-30".to_string(),
    };

    let created = ops::create_stack(&sess, &spec).await.unwrap();
    assert_eq!(created.id, "stk-teststack");
}
