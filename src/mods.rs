macro_rules! impl_mods {
    ($func_name:ident, $const_name:ident) => {
        #[inline]
        fn $func_name(self) -> bool {
            self & Self::$const_name > 0
        }
    };
}

/// Abstract type to provide flags of mods.
///
/// Bit values follow <https://github.com/ppy/osu-api/wiki#mods>.
/// Only `NF`, `EZ`, `DT` and `HT` influence osu!mania calculations,
/// any other bit is accepted and ignored.
pub trait Mods: Copy {
    const NF: u32 = 1 << 0;
    const EZ: u32 = 1 << 1;
    const HR: u32 = 1 << 4;
    const DT: u32 = 1 << 6;
    const HT: u32 = 1 << 8;
    const NC: u32 = Self::DT | (1 << 9);

    /// NoFail
    fn nf(self) -> bool;
    /// Easy
    fn ez(self) -> bool;
    /// DoubleTime, also set by NightCore
    fn dt(self) -> bool;
    /// HalfTime, unless DoubleTime is set as well in which case
    /// HalfTime is ignored.
    fn ht(self) -> bool;
    /// Factor by which the map's timeline is sped up.
    fn clock_rate(self) -> f64;
}

impl Mods for u32 {
    impl_mods!(nf, NF);
    impl_mods!(ez, EZ);
    impl_mods!(dt, DT);

    #[inline]
    fn ht(self) -> bool {
        self & Self::HT > 0 && !self.dt()
    }

    #[inline]
    fn clock_rate(self) -> f64 {
        if self.dt() {
            1.5
        } else if self.ht() {
            0.75
        } else {
            1.0
        }
    }
}
