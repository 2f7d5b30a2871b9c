use crate::config::{MAX_POWER, MIN_POWER};

pub type Result<T> = std::result::Result<T, crate::error::Error>;

/// Checks that `power` lies in `[MIN_POWER, MAX_POWER]`.
#[inline]
pub fn verify_power(power: u32) -> Result<()> {
    if (MIN_POWER..=MAX_POWER).contains(&power) {
        Ok(())
    } else {
        invalid_power(power)
    }
}

#[cold]
fn invalid_power(power: u32) -> Result<()> {
    Err(crate::error::ErrorKind::InvalidParameter {
        name: "power".to_string(),
        message: format!("{power} is outside of [{MIN_POWER}, {MAX_POWER}]"),
    }
    .into())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorKind;

    #[test]
    fn test_verify_power_bounds() {
        assert!(verify_power(1).is_ok());
        assert!(verify_power(31).is_ok());

        for power in [0, 32, 64, u32::MAX] {
            let err = verify_power(power).unwrap_err();
            assert!(matches!(
                err.kind(),
                ErrorKind::InvalidParameter { name, .. } if name == "power"
            ));
        }
    }
}
