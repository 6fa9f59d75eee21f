use crate::gpio::GpioError;

const HEADER_PIN_COUNT: usize = 40;
const BCM_PIN_COUNT: usize = 28;
const BCM_PIN_BOUNDS: (u8, u8) = (0, 27);

/// BCM number behind each position of the 40-pin header, `None` for power and ground.
/// Index 0 is physical pin 1.
#[rustfmt::skip]
const PHYSICAL_TO_BCM: [Option<u8>; HEADER_PIN_COUNT] = [
    None,     Some(2),  None,     Some(3),  None,     Some(4),  None,     Some(14),
    None,     Some(15), Some(17), Some(18), Some(27), None,     Some(22), Some(23),
    None,     Some(24), Some(10), None,     Some(9),  Some(25), Some(11), Some(8),
    None,     Some(7),  Some(0),  Some(1),  Some(5),  None,     Some(6),  Some(12),
    Some(13), None,     Some(19), Some(16), Some(26), Some(20), None,     Some(21),
];

/// How pin numbers handed to the [Board](super::Board) are interpreted
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PinNumbering {
    /// Position on the 40-pin header
    #[default]
    Physical,
    /// Broadcom SoC GPIO number
    Bcm,
}

impl PinNumbering {
    /// Translates `pin` into its BCM number, rejecting power, ground and out of range pins
    pub fn to_bcm(self, pin: u8) -> Result<u8, GpioError> {
        match self {
            PinNumbering::Physical => {
                let index = usize::from(pin).checked_sub(1).ok_or(GpioError::NotAGpioPin(pin))?;
                PHYSICAL_TO_BCM
                    .get(index)
                    .copied()
                    .flatten()
                    .ok_or(GpioError::NotAGpioPin(pin))
            }
            PinNumbering::Bcm => {
                if (BCM_PIN_BOUNDS.0..=BCM_PIN_BOUNDS.1).contains(&pin) {
                    Ok(pin)
                } else {
                    Err(GpioError::NotAGpioPin(pin))
                }
            }
        }
    }
}

/// Keeps track of which GPIO lines were already handed out. Subsequent takes of the same
/// line fail, no matter which numbering was used to ask for it.
pub(crate) struct Pins {
    numbering: PinNumbering,
    taken: [bool; BCM_PIN_COUNT],
}

impl Pins {
    pub fn new(numbering: PinNumbering) -> Pins {
        Pins { numbering, taken: [false; BCM_PIN_COUNT] }
    }

    pub fn numbering(&self) -> PinNumbering {
        self.numbering
    }

    /// Marks the pin as taken and returns its BCM number
    pub fn take(&mut self, pin: u8) -> Result<u8, GpioError> {
        let bcm = self.numbering.to_bcm(pin)?;
        let slot = &mut self.taken[usize::from(bcm)];
        if *slot {
            return Err(GpioError::PinAlreadyTaken(pin));
        }
        *slot = true;
        Ok(bcm)
    }

    /// Makes the pin available again, used when the backend refused to hand out the line
    pub fn give_back(&mut self, bcm: u8) {
        if let Some(slot) = self.taken.get_mut(usize::from(bcm)) {
            *slot = false;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn physical_pins_map_to_bcm() {
        assert_eq!(PinNumbering::Physical.to_bcm(18).unwrap(), 24);
        assert_eq!(PinNumbering::Physical.to_bcm(11).unwrap(), 17);
        assert_eq!(PinNumbering::Physical.to_bcm(40).unwrap(), 21);
        assert_eq!(PinNumbering::Physical.to_bcm(27).unwrap(), 0);
    }

    #[test]
    fn power_ground_and_missing_pins_are_rejected() {
        for pin in [0, 1, 2, 6, 17, 39, 41] {
            let result = PinNumbering::Physical.to_bcm(pin);
            assert!(matches!(result, Err(GpioError::NotAGpioPin(p)) if p == pin));
        }
        assert!(PinNumbering::Bcm.to_bcm(28).is_err());
        assert_eq!(PinNumbering::Bcm.to_bcm(27).unwrap(), 27);
    }

    #[test]
    fn a_pin_can_only_be_taken_once() {
        let mut pins = Pins::new(PinNumbering::Physical);
        assert_eq!(pins.take(18).unwrap(), 24);
        assert!(matches!(pins.take(18), Err(GpioError::PinAlreadyTaken(18))));
        pins.give_back(24);
        assert_eq!(pins.take(18).unwrap(), 24);
    }
}
