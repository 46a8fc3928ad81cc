#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum JumpState {
    Grounded,
    /// Ticks left in the air, always non-zero
    Airborne(u8),
}

impl JumpState {
    pub fn is_airborne(&self) -> bool {
        matches!(self, JumpState::Airborne(_))
    }

    /// Take off for `ticks` ticks; ignored while already in the air
    ///
    /// Returns whether the request was accepted.
    pub fn request(&mut self, ticks: u8) -> bool {
        match *self {
            JumpState::Grounded if ticks > 0 => {
                *self = JumpState::Airborne(ticks);
                true
            }
            _ => false,
        }
    }

    /// Advance by one tick
    pub fn advance(&mut self) {
        if let JumpState::Airborne(ticks) = *self {
            *self = match ticks - 1 {
                0 => JumpState::Grounded,
                left => JumpState::Airborne(left),
            };
        }
    }
}

impl Default for JumpState {
    fn default() -> Self {
        JumpState::Grounded
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn grounded_by_default() {
        assert_eq!(JumpState::default(), JumpState::Grounded);
        assert!(!JumpState::Grounded.is_airborne());
    }

    #[test]
    fn lands_after_exactly_n_ticks() {
        for n in 1..=5u8 {
            let mut jump = JumpState::Grounded;
            assert!(jump.request(n));
            for _ in 0..n - 1 {
                jump.advance();
                assert!(jump.is_airborne());
            }
            jump.advance();
            assert_eq!(jump, JumpState::Grounded);
        }
    }

    #[test]
    fn request_while_airborne_is_noop() {
        let mut jump = JumpState::Grounded;
        assert!(jump.request(2));
        jump.advance();
        assert_eq!(jump, JumpState::Airborne(1));
        assert!(!jump.request(2));
        assert_eq!(jump, JumpState::Airborne(1));
        jump.advance();
        assert_eq!(jump, JumpState::Grounded);
    }

    #[test]
    fn zero_tick_request_rejected() {
        let mut jump = JumpState::Grounded;
        assert!(!jump.request(0));
        assert_eq!(jump, JumpState::Grounded);
    }

    #[test]
    fn advancing_grounded_is_noop() {
        let mut jump = JumpState::Grounded;
        jump.advance();
        assert_eq!(jump, JumpState::Grounded);
    }
}
