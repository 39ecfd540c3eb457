use log::debug;

use crate::domain::errors::DomainError;
use crate::domain::member::MemberTeamView;
use crate::domain::page::{Page, PageRequest};
use crate::domain::ports::MemberSearchRepository;
use crate::domain::search::MemberSearchCondition;

pub struct MemberSearchService<R> {
    repo: R,
}

impl<R: MemberSearchRepository> MemberSearchService<R> {
    pub fn new(repo: R) -> Self {
        Self { repo }
    }

    pub fn search(
        &self,
        condition: &MemberSearchCondition,
    ) -> Result<Vec<MemberTeamView>, DomainError> {
        self.repo.find_all(&condition.to_predicate())
    }

    /// Always issues the count query alongside the content query.
    pub fn search_page_simple(
        &self,
        condition: &MemberSearchCondition,
        request: &PageRequest,
    ) -> Result<Page<MemberTeamView>, DomainError> {
        let predicate = condition.to_predicate();
        let content = self.repo.find_page(&predicate, request)?;
        let total = self.repo.count(&predicate)?;
        Ok(Page::new(content, request, total))
    }

    /// Issues the count query only when the content cannot determine the
    /// total (see [`Page::assemble`]).
    pub fn search_page(
        &self,
        condition: &MemberSearchCondition,
        request: &PageRequest,
    ) -> Result<Page<MemberTeamView>, DomainError> {
        let predicate = condition.to_predicate();
        let content = self.repo.find_page(&predicate, request)?;
        debug!("member search {} returned {} rows", request, content.len());
        Page::assemble(content, request, || self.repo.count(&predicate))
    }
}
