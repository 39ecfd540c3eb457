use log::info;
use uuid::Uuid;

use crate::domain::errors::DomainError;
use crate::domain::member::{validate_name, MemberView, NewMember};
use crate::domain::ports::MemberRepository;

pub struct MemberService<R> {
    repo: R,
}

impl<R: MemberRepository> MemberService<R> {
    pub fn new(repo: R) -> Self {
        Self { repo }
    }

    pub fn create_team(&self, name: &str) -> Result<Uuid, DomainError> {
        validate_name(name)?;
        let id = self.repo.create_team(name)?;
        info!("Created team {} ({})", name, id);
        Ok(id)
    }

    pub fn sign_up(&self, member: NewMember) -> Result<Uuid, DomainError> {
        member.validate()?;
        self.ensure_name_available(&member.name)?;
        let name = member.name.clone();
        let id = self.repo.create(member)?;
        info!("Signed up member {} ({})", name, id);
        Ok(id)
    }

    pub fn find_members(&self) -> Result<Vec<MemberView>, DomainError> {
        self.repo.find_all()
    }

    pub fn find_member(&self, id: Uuid) -> Result<MemberView, DomainError> {
        self.repo
            .find_by_id(id)?
            .ok_or(DomainError::NotFound("Member"))
    }

    pub fn update_name(&self, id: Uuid, name: &str) -> Result<MemberView, DomainError> {
        validate_name(name)?;
        let current = self.find_member(id)?;
        if current.name != name {
            self.ensure_name_available(name)?;
        }
        if !self.repo.update_name(id, name)? {
            return Err(DomainError::NotFound("Member"));
        }
        self.find_member(id)
    }

    fn ensure_name_available(&self, name: &str) -> Result<(), DomainError> {
        if self.repo.exists_by_name(name)? {
            return Err(DomainError::Conflict(format!(
                "member name '{}' is already taken",
                name
            )));
        }
        Ok(())
    }
}
