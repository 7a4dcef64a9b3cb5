//! Modular arithmetic over 256-bit integers.
//!
//! Only point decompression uses this module, to evaluate the curve equation and take its square
//! root modulo the field prime.
use crate::{CodecError, CodecResult};
use alloy_primitives::{uint, U256};

const ONE: U256 = uint!(1_U256);
const TWO: U256 = uint!(2_U256);

/// `(a * b) mod modulus`, without intermediate overflow.
#[inline]
pub fn mul_mod(a: U256, b: U256, modulus: U256) -> U256 {
    a.mul_mod(b, modulus)
}

/// `(a + b) mod modulus`, without intermediate overflow.
#[inline]
pub fn add_mod(a: U256, b: U256, modulus: U256) -> U256 {
    a.add_mod(b, modulus)
}

/// `base^exp mod modulus` by left-to-right binary square-and-multiply.
///
/// A modulus of one yields zero. Fails with [`CodecError::InvalidModulus`] for a zero modulus.
pub fn power_mod(base: U256, exp: U256, modulus: U256) -> CodecResult<U256> {
    if modulus.is_zero() {
        return Err(CodecError::InvalidModulus);
    }
    if modulus == ONE {
        return Ok(U256::ZERO);
    }

    let base = base.reduce_mod(modulus);
    let mut result = ONE;
    for i in (0..exp.bit_len()).rev() {
        result = result.mul_mod(result, modulus);
        if exp.bit(i) {
            result = result.mul_mod(base, modulus);
        }
    }
    Ok(result)
}

/// Euler's criterion: `a^((p - 1) / 2) == 1 (mod p)`.
///
/// Zero is not a residue under this definition. `p` must be an odd prime greater than two.
pub fn is_quadratic_residue(a: U256, p: U256) -> CodecResult<bool> {
    check_odd_prime_modulus(p)?;
    let exp = (p - ONE) >> 1usize;
    Ok(power_mod(a, exp, p)? == ONE)
}

/// Square root of `a` modulo the odd prime `p`.
///
/// Returns `Ok(None)` if `a` is a quadratic non-residue. Of the two roots, the one produced by the
/// algorithm is returned; callers pick parity themselves.
///
/// Primes with `p ≡ 3 (mod 4)`, which includes the SM2 field prime, take the direct
/// `a^((p + 1) / 4)` path. Other primes go through Tonelli-Shanks.
pub fn modular_sqrt(a: U256, p: U256) -> CodecResult<Option<U256>> {
    check_odd_prime_modulus(p)?;
    if a >= p {
        return Err(CodecError::OperandOutOfRange);
    }
    if a.is_zero() {
        return Ok(Some(U256::ZERO));
    }
    if !is_quadratic_residue(a, p)? {
        return Ok(None);
    }

    if p.bit(1) {
        // (p + 1) / 4 without overflowing when p is close to 2^256.
        let exp = (p >> 2usize) + ONE;
        return power_mod(a, exp, p).map(Some);
    }

    tonelli_shanks(a, p).map(Some)
}

/// Tonelli-Shanks for a quadratic residue `a` modulo an odd prime `p`.
fn tonelli_shanks(a: U256, p: U256) -> CodecResult<U256> {
    // p - 1 = q * 2^s with q odd
    let p_minus_one = p - ONE;
    let s = p_minus_one.trailing_zeros();
    let q = p_minus_one >> s;

    // Half of the residues are non-residues, so this terminates quickly for a prime.
    let mut z = TWO;
    while is_quadratic_residue(z, p)? {
        z += ONE;
        if z >= p {
            return Err(CodecError::InvalidModulus);
        }
    }

    let mut m = s;
    let mut c = power_mod(z, q, p)?;
    let mut t = power_mod(a, q, p)?;
    let mut r = power_mod(a, (q + ONE) >> 1usize, p)?;

    while t != ONE {
        // least 0 < i < m with t^(2^i) == 1
        let mut i = 0;
        let mut t_pow = t;
        while t_pow != ONE {
            t_pow = t_pow.mul_mod(t_pow, p);
            i += 1;
            if i == m {
                // only reachable when p is not prime
                return Err(CodecError::InvalidModulus);
            }
        }

        let mut b = c;
        for _ in 0..m - i - 1 {
            b = b.mul_mod(b, p);
        }

        m = i;
        c = b.mul_mod(b, p);
        t = t.mul_mod(c, p);
        r = r.mul_mod(b, p);
    }

    Ok(r)
}

#[inline]
fn check_odd_prime_modulus(p: U256) -> CodecResult<()> {
    if p <= TWO || !p.bit(0) {
        return Err(CodecError::InvalidModulus);
    }
    Ok(())
}
