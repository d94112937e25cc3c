#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Hand {
    Left,
    Right,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Finger {
    Pinky,
    Ring,
    Middle,
    Index,
    Thumb,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct FingerAssignment {
    pub hand: Hand,
    pub finger: Finger,
}

impl FingerAssignment {
    pub fn new(hand: Hand, finger: Finger) -> Self {
        Self { hand, finger }
    }

    pub fn thumb() -> Self {
        Self::new(Hand::Right, Finger::Thumb)
    }
}

/// Touch-typing assignment for a column counted from the first character key
/// of a row (the key under the left pinky's home column).
pub fn finger_for_column(col: usize) -> FingerAssignment {
    use Finger::*;
    use Hand::*;

    match col {
        0 => FingerAssignment::new(Left, Pinky),
        1 => FingerAssignment::new(Left, Ring),
        2 => FingerAssignment::new(Left, Middle),
        3 | 4 => FingerAssignment::new(Left, Index),
        5 | 6 => FingerAssignment::new(Right, Index),
        7 => FingerAssignment::new(Right, Middle),
        8 => FingerAssignment::new(Right, Ring),
        _ => FingerAssignment::new(Right, Pinky),
    }
}
