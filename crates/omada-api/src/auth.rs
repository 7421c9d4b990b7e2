// Session authentication
//
// Username/password login against `/login`. The controller answers with a
// token in `result`; the token is stored and injected as a query parameter
// on every subsequent request, while the session cookie rides in the jar.

use secrecy::ExposeSecret;
use serde_json::{Value, json};
use tracing::debug;

use crate::client::OmadaClient;
use crate::config::Credentials;
use crate::error::Error;

impl OmadaClient {
    /// Log in and store the session token for subsequent requests.
    ///
    /// With `credentials: None` the pair configured in `ClientConfig` is
    /// used; fails with [`Error::MissingCredentials`] when there is none
    /// either. Returns the full login result.
    ///
    /// `POST /login`
    pub async fn login(&self, credentials: Option<Credentials>) -> Result<Value, Error> {
        let creds = match credentials {
            Some(c) => c,
            None => self
                .credentials()
                .cloned()
                .ok_or(Error::MissingCredentials)?,
        };

        debug!(username = %creds.username, "logging in");

        let body = json!({
            "username": creds.username,
            "password": creds.password.expose_secret(),
        });

        let result = self
            .post("/login", None, Some(&body))
            .await?
            .ok_or_else(|| Error::Authentication {
                message: "login succeeded but returned no result".into(),
            })?;

        let token = result
            .get("token")
            .and_then(Value::as_str)
            .ok_or_else(|| Error::Authentication {
                message: "login result did not include a token".into(),
            })?;
        self.set_token(token.to_owned());

        Ok(result)
    }

    /// End the current session. The controller returns no result; the
    /// stored token is discarded on success, so later requests carry no
    /// auth parameters.
    ///
    /// `POST /logout`
    pub async fn logout(&self) -> Result<(), Error> {
        debug!("logging out");
        let _ = self.post("/logout", None, None).await?;
        self.clear_token();
        Ok(())
    }

    /// The controller's view of the current login state.
    ///
    /// `GET /loginStatus`
    pub async fn get_login_status(&self) -> Result<Value, Error> {
        let result = self.get("/loginStatus", None).await?;
        Ok(Self::result_or_null(result))
    }

    /// Information about the currently logged-in user.
    ///
    /// `GET /users/current`
    pub async fn get_current_user(&self) -> Result<Value, Error> {
        let result = self.get("/users/current", None).await?;
        Ok(Self::result_or_null(result))
    }
}
