const REQUEST_ID_ALPHABET: [char; 36] = [
    'A', 'B', 'C', 'D', 'E', 'F', 'G', 'H', 'I', 'J', 'K', 'L', 'M', 'N', 'O', 'P', 'Q', 'R',
    'S', 'T', 'U', 'V', 'W', 'X', 'Y', 'Z', '0', '1', '2', '3', '4', '5', '6', '7', '8', '9',
];

/// Length of generated request identifiers
pub const REQUEST_ID_LEN: usize = 20;

/// Generates a request correlation identifier.
///
/// The identifier is made of uppercase letters and digits, generated with
/// `nanoid`, and is sent with every request so backend logs can be matched
/// with client logs.
///
/// # Examples
/// ```
/// use finance_client::utils::id::request_id;
/// let id = request_id();
/// assert_eq!(id.len(), 20);
/// ```
#[must_use]
pub fn request_id() -> String {
    nanoid::nanoid!(REQUEST_ID_LEN, &REQUEST_ID_ALPHABET)
}
