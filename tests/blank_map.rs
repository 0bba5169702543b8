use mania_pp::{Beatmap, ManiaPP, ManiaStars};

#[test]
fn stars() {
    let map = Beatmap::from_notes(4, 8.0, Vec::new());

    for mods in [0, 1, 2, 64, 256, 64 + 256] {
        let attrs = ManiaStars::new(&map).mods(mods).calculate();

        assert_eq!(attrs.stars(), None);
        assert_eq!(attrs.n_objects, 0);
    }
}

#[test]
fn pp() {
    let map = Beatmap::from_notes(7, 10.0, Vec::new());

    for score in [0, 500_000, 1_000_000, u32::MAX] {
        let attrs = ManiaPP::new(&map).mods(1 + 2).score(score).calculate();

        assert_eq!(attrs.stars(), None);
        assert_eq!(attrs.pp(), 0.0);
        assert!(!attrs.pp().is_nan());
    }
}

#[test]
fn strains() {
    let map = Beatmap::from_notes(4, 8.0, Vec::new());
    let strains = ManiaStars::new(&map).mods(64).strains();

    assert!(strains.is_empty());
    assert_eq!(strains.section_length, 600.0);
}
