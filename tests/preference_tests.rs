use vimb_preferences::{PALETTE_SIZE, PreferenceSet, Rgba};

#[test]
fn test_preference_defaults() {
    let preferences = PreferenceSet::default();
    assert_eq!(preferences.background, Rgba::from_rgb8(0, 0, 0));
    assert_eq!(preferences.foreground, Rgba::from_rgb8(255, 255, 255));
    assert_eq!(preferences.cursor, Rgba::from_rgb8(255, 255, 255));
    assert_eq!(preferences.bold, Rgba::from_rgb8(255, 255, 255));
    assert_eq!(preferences.opacity, 1.0);
    assert_eq!(preferences.font_family, "monospace");
    assert_eq!(preferences.font_size, "12");
    assert_eq!(preferences.palette.len(), PALETTE_SIZE);
    // ANSI slots 0 and 15: black and bright white
    assert_eq!(preferences.palette[0], Rgba::from_rgb8(0, 0, 0));
    assert_eq!(preferences.palette[15], Rgba::from_rgb8(255, 255, 255));
}

#[test]
fn test_parse_empty_equals_defaults() {
    assert_eq!(PreferenceSet::parse(""), PreferenceSet::default());
}

#[test]
fn test_parse_realistic_file() {
    let source = "\
ColorBackground=#282a36
ColorForeground=#f8f8f2
ColorCursor=#f8f8f0
ColorBold=white
ColorPalette=#000000;#ff5555;#50fa7b;#f1fa8c
#bd93f9;#ff79c6;#8be9fd;#ffffff
Opacity=0.95
FontFamily=JetBrains Mono
FontSize=12pt
";
    let preferences = PreferenceSet::parse(source);
    assert_eq!(preferences.background, Rgba::parse("#282a36").unwrap());
    assert_eq!(preferences.foreground, Rgba::parse("#f8f8f2").unwrap());
    assert_eq!(preferences.bold, Rgba::from_rgb8(255, 255, 255));
    assert_eq!(preferences.opacity, 0.95);
    assert_eq!(preferences.font_family, "JetBrains Mono");
    assert_eq!(preferences.font_size, "12pt");
    // Continuation line fills slots 4..8; 8..16 stay default
    assert_eq!(preferences.palette[4], Rgba::parse("#bd93f9").unwrap());
    assert_eq!(preferences.palette[7], Rgba::from_rgb8(255, 255, 255));
    assert_eq!(preferences.palette[8], PreferenceSet::default().palette[8]);
}

#[test]
fn test_parse_survives_malformed_input() {
    // None of these may panic, and all must yield a fully populated set
    for source in [
        "ColorForeground=not-a-color\n",
        "Opacity=opaque\n",
        "=\n===\n",
        "ColorPalette=;;;\n",
        "ColorForeground\n",
        "\u{0}\u{1}\u{2}\n",
    ] {
        let preferences = PreferenceSet::parse(source);
        assert_eq!(preferences.palette.len(), PALETTE_SIZE);
        assert_eq!(preferences.foreground, PreferenceSet::default().foreground);
    }
}

#[test]
fn test_rc_string_round_trip() {
    let source = "\
ColorBackground=#111111
ColorForeground=#eeeeee
Opacity=0.5
FontSize=14
";
    let preferences = PreferenceSet::parse(source);
    let reparsed = PreferenceSet::parse(&preferences.to_rc_string());
    assert_eq!(reparsed, preferences);
}

#[cfg(feature = "watcher")]
mod watcher {
    use std::sync::Arc;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::time::Duration;
    use tempfile::TempDir;
    use vimb_preferences::PreferenceWatcher;

    #[test]
    fn test_watch_delivers_initial_snapshot_then_honors_cancel() {
        let temp_dir = TempDir::new().expect("Failed to create temp dir");
        let rc_path = temp_dir.path().join("preferencerc");
        std::fs::write(&rc_path, "FontFamily=Hack\n").expect("Failed to write preferencerc");

        let count = Arc::new(AtomicUsize::new(0));
        let inner = Arc::clone(&count);
        let watcher = PreferenceWatcher::watch(&rc_path, 0, move |preferences| {
            assert_eq!(preferences.font_family, "Hack");
            inner.fetch_add(1, Ordering::SeqCst);
        })
        .expect("Failed to create watcher");

        let after_initial = count.load(Ordering::SeqCst);
        assert!(after_initial >= 1, "watch() must deliver once before returning");

        watcher.cancel();
        std::fs::write(&rc_path, "FontFamily=Hack\n").expect("Failed to write preferencerc");
        std::thread::sleep(Duration::from_millis(700));
        assert_eq!(count.load(Ordering::SeqCst), after_initial);
    }
}
