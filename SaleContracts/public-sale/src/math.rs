use crate::types::{Error, Rounding, SaleConfig, BPS_DENOMINATOR};

/// `a * b / c` with checked arithmetic and the given rounding.
pub fn mul_div(a: i128, b: i128, c: i128, rounding: Rounding) -> Result<i128, Error> {
    if c <= 0 {
        return Err(Error::InvalidConfig);
    }
    let product = a.checked_mul(b).ok_or(Error::ArithmeticOverflow)?;
    let quotient = product / c;
    match rounding {
        Rounding::Down => Ok(quotient),
        Rounding::Up if product % c != 0 => {
            quotient.checked_add(1).ok_or(Error::ArithmeticOverflow)
        }
        Rounding::Up => Ok(quotient),
    }
}

/// Share of `amount` given in basis points.
pub fn bps_of(amount: i128, bps: u32, rounding: Rounding) -> Result<i128, Error> {
    mul_div(amount, bps as i128, BPS_DENOMINATOR, rounding)
}

/// Sale tokens bought by `pay_amount` pay tokens.
pub fn pay_to_sale(config: &SaleConfig, pay_amount: i128) -> Result<i128, Error> {
    mul_div(
        pay_amount,
        config.pay_token_price,
        config.sale_token_price,
        config.rounding,
    )
}

/// Pay tokens needed for `sale_amount` sale tokens.
pub fn sale_to_pay(config: &SaleConfig, sale_amount: i128) -> Result<i128, Error> {
    mul_div(
        sale_amount,
        config.sale_token_price,
        config.pay_token_price,
        config.rounding,
    )
}

pub fn checked_add(a: i128, b: i128) -> Result<i128, Error> {
    a.checked_add(b).ok_or(Error::ArithmeticOverflow)
}

pub fn checked_sub(a: i128, b: i128) -> Result<i128, Error> {
    a.checked_sub(b).ok_or(Error::ArithmeticOverflow)
}
