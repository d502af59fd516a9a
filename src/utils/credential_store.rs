use keyring::Entry;

const SERVICE_NAME: &str = "retail_dw_scripts";

fn entry_for(connection_name: &str) -> Result<Entry, keyring::Error> {
    Entry::new(SERVICE_NAME, connection_name)
}

/// Retrieve the database password stored in the OS keyring under the
/// connection name. Returns Ok(None) if no credential is found (not an error).
pub fn get_password(connection_name: &str) -> Result<Option<String>, String> {
    let entry = entry_for(connection_name).map_err(|e| format!("Keyring error: {}", e))?;
    match entry.get_password() {
        Ok(password) => Ok(Some(password)),
        Err(keyring::Error::NoEntry) => Ok(None),
        Err(e) => Err(format!("Failed to retrieve password from keyring: {}", e)),
    }
}
