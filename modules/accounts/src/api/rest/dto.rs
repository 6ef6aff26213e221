use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

use crate::contract::model::{
    Contact, Credentials, NewRegistration, PactAddition, Registration, Session, UserProfile,
};

/// REST DTO for registration. Missing fields deserialize as empty and are
/// rejected by the service.
#[derive(Deserialize, ToSchema, Default)]
#[serde(default)]
pub struct RegisterReq {
    pub name: String,
    pub email: String,
    pub password: String,
}

/// REST DTO for login
#[derive(Deserialize, ToSchema, Default)]
#[serde(default)]
pub struct LoginReq {
    pub email: String,
    pub password: String,
}

/// Target of a pact add/remove request
#[derive(Debug, Deserialize, ToSchema, Default)]
#[serde(default)]
pub struct PactEmailReq {
    pub email: String,
}

/// REST DTO for a user profile
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct UserDto {
    pub id: Uuid,
    pub name: String,
    pub email: String,
}

/// Bearer token plus the profile it was issued for
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct SessionDto {
    pub token: String,
    pub id: Uuid,
    pub name: String,
    pub email: String,
    pub verified: bool,
}

/// Response body of a successful registration
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct RegistrationDto {
    pub token: String,
    pub id: Uuid,
    pub name: String,
    pub email: String,
    pub message: String,
    pub verification_email_sent: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct ContactDto {
    pub id: Uuid,
    pub name: String,
    pub email: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct PactDto {
    pub pact: Vec<ContactDto>,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct PactAdditionDto {
    pub user_added_id: Uuid,
    pub pact: Vec<ContactDto>,
}

/// Plain informational response
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct MessageDto {
    pub message: String,
}

impl MessageDto {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

// Conversion implementations between REST DTOs and contract models

impl From<RegisterReq> for NewRegistration {
    fn from(req: RegisterReq) -> Self {
        Self {
            name: req.name,
            email: req.email,
            password: req.password,
        }
    }
}

impl From<LoginReq> for Credentials {
    fn from(req: LoginReq) -> Self {
        Self {
            email: req.email,
            password: req.password,
        }
    }
}

impl From<UserProfile> for UserDto {
    fn from(user: UserProfile) -> Self {
        Self {
            id: user.id,
            name: user.name,
            email: user.email,
        }
    }
}

impl From<Session> for SessionDto {
    fn from(session: Session) -> Self {
        Self {
            token: session.token,
            id: session.user.id,
            name: session.user.name,
            email: session.user.email,
            verified: session.verified,
        }
    }
}

impl From<Registration> for RegistrationDto {
    fn from(reg: Registration) -> Self {
        Self {
            token: reg.session.token,
            id: reg.session.user.id,
            name: reg.session.user.name,
            email: reg.session.user.email,
            message: reg.message,
            verification_email_sent: reg.verification_email_sent,
        }
    }
}

impl From<Contact> for ContactDto {
    fn from(c: Contact) -> Self {
        Self {
            id: c.id,
            name: c.name,
            email: c.email,
        }
    }
}

impl From<Vec<Contact>> for PactDto {
    fn from(pact: Vec<Contact>) -> Self {
        Self {
            pact: pact.into_iter().map(ContactDto::from).collect(),
        }
    }
}

impl From<PactAddition> for PactAdditionDto {
    fn from(add: PactAddition) -> Self {
        Self {
            user_added_id: add.user_added_id,
            pact: add.pact.into_iter().map(ContactDto::from).collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_register_fields_default_to_empty() {
        let req: RegisterReq = serde_json::from_str(r#"{"email":"a@x.com"}"#).unwrap();
        assert_eq!(req.email, "a@x.com");
        assert!(req.name.is_empty());
        assert!(req.password.is_empty());
    }

    #[test]
    fn registration_flattens_session() {
        let id = Uuid::new_v4();
        let dto = RegistrationDto::from(Registration {
            session: Session {
                token: "jwt".into(),
                user: UserProfile {
                    id,
                    name: "Ann".into(),
                    email: "a@x.com".into(),
                },
                verified: false,
            },
            message: "sent".into(),
            verification_email_sent: true,
        });
        let json = serde_json::to_value(dto).unwrap();
        assert_eq!(json["id"], id.to_string());
        assert_eq!(json["token"], "jwt");
        assert_eq!(json["verification_email_sent"], true);
    }
}
