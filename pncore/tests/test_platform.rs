use pncore::{
    device::{
        CloudMessageType,
        FormError,
        GcmDevice,
        GcmDeviceForm,
        NewGcmDevice,
    },
    platform::DevicePlatform,
};
use test_pn::core::MockPlatform;

// The mock lives in the testing crate which sees this crate through its
// external path, so these checks are done as integration tests instead of
// module level tests.

fn device(id: i64, device_id: Option<&str>) -> GcmDevice {
    GcmDevice {
        id,
        name: None,
        active: true,
        user_id: None,
        created_ts: 1234567890,
        device_id: device_id.map(str::to_string),
        registration_id: "token".into(),
        cloud_message_type: CloudMessageType::Fcm,
        application_id: None,
    }
}

#[async_std::test]
async fn register_gcm_device() -> anyhow::Result<()> {
    let mut platform = MockPlatform::new();
    platform.expect_gcm_device_add()
        .times(1)
        .withf(|device| device == &NewGcmDevice {
            active: true,
            device_id: Some("0xFF".into()),
            registration_id: "token".into(),
            ..Default::default()
        })
        .returning(|_| Ok(7));
    platform.expect_gcm_device_get()
        .times(1)
        .withf(|id| *id == 7)
        .returning(|id| Ok(device(id, Some("ff"))));

    let form = GcmDeviceForm {
        device_id: Some("0xFF".into()),
        registration_id: Some("token".into()),
        ..Default::default()
    };
    let result = platform.register_gcm_device(&form).await?;
    assert_eq!(result.id, 7);
    assert_eq!(result.device_id.as_deref(), Some("ff"));
    Ok(())
}

#[async_std::test]
async fn register_gcm_device_rejects_malformed() -> anyhow::Result<()> {
    let mut platform = MockPlatform::new();
    // the backend must never see the malformed value
    platform.expect_gcm_device_add()
        .times(0);
    platform.expect_gcm_device_get()
        .times(0);

    let form = GcmDeviceForm {
        device_id: Some("12g4".into()),
        registration_id: Some("token".into()),
        ..Default::default()
    };
    match platform.register_gcm_device(&form).await {
        Err(FormError::Invalid(errors)) => {
            assert_eq!(
                errors.get("device_id").map(|e| e.to_string()).as_deref(),
                Some("Enter a valid hexadecimal number"),
            );
        }
        other => panic!("unexpected result: {other:?}"),
    }
    Ok(())
}

#[async_std::test]
async fn change_gcm_device_id() -> anyhow::Result<()> {
    let mut platform = MockPlatform::new();
    platform.expect_gcm_device_set_device_id()
        .times(1)
        .withf(|id, device_id| *id == 3 && device_id.as_deref() == Some("1a2b3c"))
        .returning(|_, _| Ok(true));
    platform.expect_gcm_device_set_device_id()
        .times(1)
        .withf(|id, device_id| *id == 4 && device_id.is_none())
        .returning(|_, _| Ok(true));

    assert!(platform.change_gcm_device_id(3, Some(" 1a2b3c ")).await?);
    assert!(platform.change_gcm_device_id(4, Some("")).await?);

    assert!(matches!(
        platform.change_gcm_device_id(5, Some("0x")).await,
        Err(FormError::Invalid(errors)) if errors.get("device_id").is_some(),
    ));
    Ok(())
}
