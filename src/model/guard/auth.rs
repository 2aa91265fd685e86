/// used to represent the result of calling `HeaderAuth::validate`
#[derive(PartialEq, Debug)]
pub enum ValidateResult {
    Ok,
    /// no user with the passed username is registered
    UnknownUser,
    Invalid,
}
