/// Linear congruential generator driving every random decision in the rain.
///
/// Same seed, same sequence. The engine never reaches for the thread RNG, so
/// two engines built from one seed stay in lockstep for as long as they are
/// fed the same timestamps.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Lcg {
    state: u32,
}

const MULTIPLIER: u32 = 1_103_515_245;
const INCREMENT: u32 = 12_345;
/// `next_u32` yields 16 bits, so draws lie in `[0, DRAW_RANGE)`.
const DRAW_RANGE: f32 = 65_536.0;

impl Lcg {
    pub fn new(seed: u32) -> Self {
        Self { state: seed }
    }

    pub fn state(&self) -> u32 {
        self.state
    }

    /// Advances the recurrence and returns the 16 high bits of the new state.
    pub fn next_u32(&mut self) -> u32 {
        self.state = self.state.wrapping_mul(MULTIPLIER).wrapping_add(INCREMENT);
        (self.state >> 16) & 0xFFFF
    }

    /// Value in `[lo, hi)`; `lo` when the range is empty.
    pub fn range_int(&mut self, lo: i32, hi: i32) -> i32 {
        if hi <= lo {
            return lo;
        }
        let span = (hi as i64 - lo as i64) as u64;
        let offset = u64::from(self.next_u32()) % span;
        (lo as i64 + offset as i64) as i32
    }

    pub fn range_usize(&mut self, lo: usize, hi: usize) -> usize {
        if hi <= lo {
            return lo;
        }
        lo + self.next_u32() as usize % (hi - lo)
    }

    /// Value in `[0, 1)`, uniform over the 65536 possible draws.
    pub fn range_float(&mut self) -> f32 {
        self.next_u32() as f32 / DRAW_RANGE
    }

    /// Always consumes exactly one draw, even for `p <= 0` or `p >= 1`.
    pub fn chance(&mut self, p: f32) -> bool {
        self.range_float() < p
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[test]
    fn same_seed_same_sequence() {
        let mut a = Lcg::new(42);
        let mut b = Lcg::new(42);
        for _ in 0..1000 {
            assert_eq!(a.next_u32(), b.next_u32());
        }
    }

    #[test]
    fn different_seeds_diverge() {
        let mut a = Lcg::new(1);
        let mut b = Lcg::new(2);
        let xs: Vec<u32> = (0..16).map(|_| a.next_u32()).collect();
        let ys: Vec<u32> = (0..16).map(|_| b.next_u32()).collect();
        assert_ne!(xs, ys);
    }

    #[test]
    fn first_draw_follows_recurrence() {
        let mut rng = Lcg::new(0);
        assert_eq!(rng.next_u32(), (12_345u32 >> 16) & 0xFFFF);
        assert_eq!(rng.state(), 12_345);
    }

    #[rstest]
    #[case(0, 10)]
    #[case(-20, 0)]
    #[case(1, 2)]
    #[case(30, 41)]
    fn range_int_stays_in_bounds(#[case] lo: i32, #[case] hi: i32) {
        let mut rng = Lcg::new(7);
        for _ in 0..2000 {
            let v = rng.range_int(lo, hi);
            assert!(v >= lo && v < hi, "{v} outside [{lo}, {hi})");
        }
    }

    #[rstest]
    #[case(5, 5)]
    #[case(9, 3)]
    fn empty_range_returns_lo(#[case] lo: i32, #[case] hi: i32) {
        let mut rng = Lcg::new(7);
        assert_eq!(rng.range_int(lo, hi), lo);
        assert_eq!(rng.range_usize(lo as usize, hi as usize), lo as usize);
    }

    #[test]
    fn range_int_covers_small_range() {
        let mut rng = Lcg::new(99);
        let mut seen = [false; 4];
        for _ in 0..500 {
            seen[rng.range_int(0, 4) as usize] = true;
        }
        assert!(seen.iter().all(|s| *s));
    }

    #[test]
    fn range_float_is_unit_interval() {
        let mut rng = Lcg::new(3);
        for _ in 0..5000 {
            let f = rng.range_float();
            assert!((0.0..1.0).contains(&f));
        }
    }

    #[test]
    fn draws_use_sixteen_bits() {
        let mut rng = Lcg::new(21);
        let high = (0..10_000).map(|_| rng.next_u32()).filter(|v| *v > 0x7FFF).count();
        assert!(high > 4_000, "only {high} draws above 0x7FFF");
        assert!((0..10_000).all(|_| rng.next_u32() <= 0xFFFF));

        let mut rng = Lcg::new(21);
        assert!((0..10_000).any(|_| rng.range_int(0, 40_000) >= 32_768));
    }

    #[rstest]
    #[case(0.01)]
    #[case(0.1)]
    #[case(0.25)]
    #[case(0.5)]
    fn chance_frequency_tracks_p(#[case] p: f32) {
        const DRAWS: usize = 200_000;
        let mut rng = Lcg::new(42);
        let hits = (0..DRAWS).filter(|_| rng.chance(p)).count();
        let freq = hits as f32 / DRAWS as f32;
        let tolerance = (0.05 * p).max(0.003);
        assert!((freq - p).abs() < tolerance, "p = {p}, observed {freq}");
    }

    #[test]
    fn chance_extremes() {
        let mut rng = Lcg::new(11);
        for _ in 0..500 {
            assert!(!rng.chance(0.0));
            assert!(rng.chance(1.0));
        }
    }

    #[test]
    fn chance_consumes_one_draw() {
        let mut a = Lcg::new(5);
        let mut b = Lcg::new(5);
        a.chance(0.0);
        b.next_u32();
        assert_eq!(a, b);
    }
}
