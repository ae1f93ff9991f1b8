//! Resolution of the acting user from the session.

use actix_web::web;

use crate::domain::{Error, User};

use super::session::SessionContext;
use super::state::HttpState;

/// Resolve the logged-in user behind the current session.
///
/// A session may outlive its user row, so a stored id that no longer
/// resolves is treated the same as no session at all.
pub async fn acting_user(
    state: &web::Data<HttpState>,
    session: &SessionContext,
) -> Result<User, Error> {
    let user_id = session.require_user_id()?;
    match state.accounts().find_user(user_id).await? {
        Some(user) => Ok(user),
        None => {
            session.purge();
            Err(Error::unauthorized("login required"))
        }
    }
}
