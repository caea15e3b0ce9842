//! Facade-level tests driving a [`Comparison`] across several frames, the
//! way a caller wiring an ear model to this crate would.

use peaq::{Comparison, Config};

const Z: usize = 109;

#[test]
fn identical_program_material_scores_perfectly() {
    let mut cmp = Comparison::new(Config::default()).unwrap();

    let mod_pattern = vec![0.4_f64; Z];
    let avg_loud = vec![1.0_f64; Z];
    let noise = vec![0.3_f64; Z];
    let adapted = vec![1.0_f64; Z];
    let power = vec![1.0_f64; 1025];

    for _ in 0..8 {
        cmp.movs_mut()
            .process_modulation_difference(0, &mod_pattern, &mod_pattern, &avg_loud, &noise);
        cmp.movs_mut()
            .process_rms_noise_loudness(0, &mod_pattern, &mod_pattern, &adapted, &adapted, &noise);
        cmp.movs_mut().process_bandwidth(0, &power, &power);
    }

    let movs = cmp.finalize();
    assert!(movs.avg_mod_diff1.abs() < 1e-9);
    assert!(movs.avg_mod_diff2.abs() < 1e-9);
    assert_eq!(movs.rms_noise_loud, 0.0);
    // a flat spectrum never crosses the bandwidth gate's 10x rolloff test
    assert_eq!(movs.bandwidth_ref, 0.0);
    assert_eq!(movs.bandwidth_test, 0.0);
}

#[test]
fn tentative_frame_discarded_on_reset_leaves_committed_values_untouched() {
    let mut cmp = Comparison::new(Config::default()).unwrap();

    let quiet = vec![0.1_f64; Z];
    let noisy = vec![0.9_f64; Z];
    let avg_loud = vec![1.0_f64; Z];
    let noise = vec![0.3_f64; Z];

    cmp.movs_mut()
        .process_modulation_difference(0, &quiet, &quiet, &avg_loud, &noise);
    let committed = cmp.finalize();
    assert_eq!(committed.avg_mod_diff1, 0.0);

    cmp.set_tentative(true);
    cmp.movs_mut()
        .process_modulation_difference(0, &quiet, &noisy, &avg_loud, &noise);
    let after_tentative = cmp.finalize();
    assert_eq!(after_tentative.avg_mod_diff1, committed.avg_mod_diff1);

    cmp.set_tentative(false);
    let after_discard = cmp.finalize();
    assert_eq!(after_discard.avg_mod_diff1, committed.avg_mod_diff1);
}

#[test]
fn tentative_frame_committed_changes_finalized_value() {
    let mut cmp = Comparison::new(Config::default()).unwrap();

    let quiet = vec![0.1_f64; Z];
    let noisy = vec![0.9_f64; Z];
    let avg_loud = vec![1.0_f64; Z];
    let noise = vec![0.3_f64; Z];

    let before = cmp.finalize();
    assert_eq!(before.avg_mod_diff1, 0.0);

    cmp.set_tentative(true);
    cmp.movs_mut()
        .process_modulation_difference(0, &quiet, &noisy, &avg_loud, &noise);
    cmp.set_tentative(false);

    let after = cmp.finalize();
    assert!(after.avg_mod_diff1 > before.avg_mod_diff1);
}

#[test]
fn stereo_comparison_tracks_both_channels() {
    let config = Config {
        channels: 2,
        ..Config::default()
    };
    let mut cmp = Comparison::new(config).unwrap();
    assert_eq!(cmp.movs_mut().channels(), 2);

    let pattern = vec![0.2_f64; Z];
    let avg_loud = vec![1.0_f64; Z];
    let noise = vec![0.3_f64; Z];

    cmp.movs_mut()
        .process_modulation_difference(0, &pattern, &pattern, &avg_loud, &noise);
    cmp.movs_mut()
        .process_modulation_difference(1, &pattern, &pattern, &avg_loud, &noise);

    let movs = cmp.finalize();
    assert_eq!(movs.avg_mod_diff1, 0.0);
}
