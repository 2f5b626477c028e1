#[cfg(test)]
mod tests {
    use std::{env, fs, path::PathBuf, process};

    use win_keycode::{Key, PadButtons};

    use crate::*;

    /// A scratch directory unique to this test process and `name`.
    fn scratch_dir(name: &str) -> PathBuf {
        let dir = env::temp_dir().join(format!("config-test-{}-{}", process::id(), name));
        let _ignored = fs::remove_dir_all(&dir);
        dir
    }

    const DRIVER_PROFILE: &str = r#"{
        "window_width": 1920,
        "window_height": 1080,
        "fov": 90.0,
        "depth": 0.1,
        "convergence": 1.0,
        "disable_hotkeys": false,
        "display_frequency": 60.0,
        "pose_reset_key": "VK_NUMPAD7",
        "user_settings": [
            {
                "user_load_key": "VK_NUMPAD1",
                "user_store_key": "VK_NUMPAD4",
                "user_key_type": "switch",
                "user_depth": 0.1,
                "user_convergence": 1.0
            },
            {
                "user_load_key": "XINPUT_GAMEPAD_GUIDE",
                "user_store_key": "VK_NUMPAD5",
                "user_key_type": "toggle",
                "user_depth": 0.065,
                "user_convergence": 1.0
            },
            {
                "user_load_key": "VK_NUMPAD3",
                "user_store_key": "VK_NUMPAD6",
                "user_key_type": "hold",
                "user_depth": 0.065,
                "user_convergence": 1.0,
                "user_fov": 75.0
            }
        ]
    }"#;

    #[test]
    fn driver_profile_parses() {
        let p = load_from_str(DRIVER_PROFILE, None).unwrap();
        assert_eq!(p.user_settings.len(), 3);
        assert_eq!(
            p.user_settings[1].user_load_key,
            InputBinding::Pad(PadButtons::GUIDE)
        );
        assert_eq!(p.user_settings[2].user_key_type, HotkeyMode::Hold);
        assert_eq!(p.user_settings[2].user_fov, Some(75.0));
        assert_eq!(p.debounce_ticks_max(), 30);
        assert_eq!(p.tolerance(), TOLERANCE);
        assert_eq!(p.extra.get("window_width"), Some(&serde_json::json!(1920)));
        assert_eq!(
            p.extra.get("pose_reset_key"),
            Some(&serde_json::json!("VK_NUMPAD7"))
        );
    }

    #[test]
    fn missing_fields_take_defaults() {
        let p = load_from_str("{}", None).unwrap();
        assert_eq!(p, default_profile());
    }

    #[test]
    fn label_defaults_to_load_binding() {
        let p = load_from_str(DRIVER_PROFILE, None).unwrap();
        assert_eq!(p.user_settings[0].display_label(), "VK_NUMPAD1");
        let json = r#"{"user_settings": [{
            "user_load_key": "F5", "user_store_key": "F6",
            "user_depth": 0.2, "user_convergence": 2.0, "label": "close-up"
        }]}"#;
        let p = load_from_str(json, None).unwrap();
        assert_eq!(p.user_settings[0].display_label(), "close-up");
        assert_eq!(p.user_settings[0].user_key_type, HotkeyMode::Toggle);
        assert_eq!(
            p.user_settings[0].user_load_key,
            InputBinding::Key(Key::F5)
        );
    }

    #[test]
    fn explicit_debounce_and_tolerance() {
        let json = r#"{"debounce_ticks": 12, "tolerance": 0.01, "display_frequency": 144}"#;
        let p = load_from_str(json, None).unwrap();
        assert_eq!(p.debounce_ticks_max(), 12);
        assert_eq!(p.tolerance(), 0.01);

        let json = r#"{"display_frequency": 144}"#;
        assert_eq!(load_from_str(json, None).unwrap().debounce_ticks_max(), 72);
    }

    #[test]
    fn unknown_entry_field_fails() {
        // misspelled user_depth => user_dpeth should error
        let json = r#"{"user_settings": [{
            "user_load_key": "VK_F1", "user_store_key": "VK_F2",
            "user_dpeth": 0.2, "user_depth": 0.2, "user_convergence": 1.0
        }]}"#;
        assert!(matches!(
            load_from_str(json, None),
            Err(Error::Parse { .. })
        ));
    }

    #[test]
    fn invalid_mode_fails() {
        let json = r#"{"user_settings": [{
            "user_load_key": "VK_F1", "user_store_key": "VK_F2", "user_key_type": "latch",
            "user_depth": 0.2, "user_convergence": 1.0
        }]}"#;
        assert!(matches!(
            load_from_str(json, None),
            Err(Error::Parse { .. })
        ));
    }

    #[test]
    fn negative_debounce_fails() {
        let json = r#"{"debounce_ticks": -3}"#;
        assert!(matches!(
            load_from_str(json, None),
            Err(Error::Parse { .. })
        ));
    }

    #[test]
    fn unknown_key_name_reports_location() {
        let json = "{\n  \"user_settings\": [{\n    \"user_load_key\": \"VK_NOPE\",\n    \"user_store_key\": \"VK_F2\",\n    \"user_depth\": 0.2, \"user_convergence\": 1.0\n  }]\n}";
        match load_from_str(json, None) {
            Err(Error::Parse {
                line,
                message,
                excerpt,
                ..
            }) => {
                assert_eq!(line, 3);
                assert!(message.contains("VK_NOPE"), "message: {}", message);
                assert!(excerpt.contains('^'));
            }
            other => panic!("expected parse error, got {:?}", other),
        }
    }

    #[test]
    fn duplicate_load_binding_fails() {
        let json = r#"{"user_settings": [
            {"user_load_key": "VK_F1", "user_store_key": "VK_F2",
             "user_depth": 0.2, "user_convergence": 1.0},
            {"user_load_key": "vk_f1", "user_store_key": "VK_F3",
             "user_depth": 0.3, "user_convergence": 1.0}
        ]}"#;
        match load_from_str(json, None) {
            Err(Error::Validation { entry, .. }) => assert_eq!(entry, Some(1)),
            other => panic!("expected validation error, got {:?}", other),
        }
    }

    #[test]
    fn overlapping_pad_chords_are_allowed() {
        let json = r#"{"user_settings": [
            {"user_load_key": "XINPUT_GAMEPAD_A", "user_store_key": "VK_F2",
             "user_depth": 0.2, "user_convergence": 1.0},
            {"user_load_key": "XINPUT_GAMEPAD_A+XINPUT_GAMEPAD_B", "user_store_key": "VK_F3",
             "user_depth": 0.3, "user_convergence": 1.0}
        ]}"#;
        let p = load_from_str(json, None).unwrap();
        assert_eq!(p.user_settings.len(), 2);
    }

    #[test]
    fn bad_numbers_fail_validation() {
        for json in [
            r#"{"depth": -0.1}"#,
            r#"{"tolerance": 0.0}"#,
            r#"{"display_frequency": 0}"#,
            r#"{"user_settings": [{"user_load_key": "VK_F1", "user_store_key": "VK_F2",
                "user_depth": -1.0, "user_convergence": 1.0}]}"#,
        ] {
            assert!(
                matches!(load_from_str(json, None), Err(Error::Validation { .. })),
                "accepted {}",
                json
            );
        }
    }

    #[test]
    fn save_and_reload_preserves_everything() {
        let dir = scratch_dir("roundtrip");
        let path = profile_path(&dir, "steam.app.620");

        let mut p = load_from_str(DRIVER_PROFILE, None).unwrap();
        p.user_settings[1].user_depth = 0.042;
        save_to_path(&p, &path).unwrap();

        let text = fs::read_to_string(&path).unwrap();
        assert!(text.contains("\n    \"depth\""), "four-space indent:\n{}", text);

        let back = load_from_path(&path).unwrap();
        assert_eq!(back, p);
        let _ignored = fs::remove_dir_all(&dir);
    }

    #[test]
    fn saved_text_keeps_short_numbers_and_field_order() {
        let src = r#"{
            "window_width": 1920,
            "zeta": 1,
            "depth": 0.1,
            "convergence": 1.0,
            "alpha": 2
        }"#;
        let text = to_json_string(&load_from_str(src, None).unwrap()).unwrap();
        assert!(text.contains("\"depth\": 0.1,"), "{}", text);
        assert!(text.contains("\"user_depth\": 0.065,"), "{}", text);
        assert!(!text.contains("0.0649999"), "{}", text);

        let at = |key: &str| {
            text.find(&format!("\"{}\"", key))
                .unwrap_or_else(|| panic!("{} missing:\n{}", key, text))
        };
        assert!(at("depth") < at("convergence"));
        assert!(at("convergence") < at("user_settings"));
        assert!(at("user_settings") < at("window_width"));
        assert!(at("window_width") < at("zeta"));
        assert!(at("zeta") < at("alpha"));
    }

    #[test]
    fn extra_keys_never_shadow_fields() {
        let mut p = default_profile();
        p.extra.insert("depth".into(), serde_json::json!(9));
        p.extra.insert("fov".into(), serde_json::json!(90.0));
        let text = to_json_string(&p).unwrap();
        assert_eq!(text.matches("\"depth\"").count(), 1, "{}", text);
        let back = load_from_str(&text, None).unwrap();
        assert_eq!(back.depth, 0.1);
        assert_eq!(back.extra.get("fov"), Some(&serde_json::json!(90.0)));
    }

    #[test]
    fn ensure_default_config_does_not_overwrite() {
        let dir = scratch_dir("ensure-default");
        let path = ensure_default_config(&dir).unwrap();
        assert_eq!(path, dir.join(DEFAULT_PROFILE_FILE));
        assert_eq!(load_from_path(&path).unwrap(), default_profile());

        fs::write(&path, r#"{"depth": 0.5}"#).unwrap();
        let again = ensure_default_config(&dir).unwrap();
        assert_eq!(again, path);
        assert_eq!(load_from_path(&path).unwrap().depth, 0.5);
        let _ignored = fs::remove_dir_all(&dir);
    }

    #[test]
    fn read_errors_carry_path() {
        let dir = scratch_dir("missing");
        let path = dir.join("nope.json");
        let err = load_from_path(&path).unwrap_err();
        assert!(matches!(err, Error::Read { .. }));
        assert_eq!(err.path(), Some(path.as_path()));
        assert!(err.pretty().starts_with("Read error at"));
    }
}
