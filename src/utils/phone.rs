/// Keep only the ASCII digits of a stored phone number, as expected by `wa.me`.
pub fn digits_only(phone: &str) -> String {
    phone.chars().filter(|c| c.is_ascii_digit()).collect()
}
