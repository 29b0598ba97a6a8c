use crate::{
    error::SehatError,
    shared::{
        auth::protect_route,
        usecase::{execute, UseCase},
    },
};
use actix_web::{web, HttpRequest, HttpResponse};
use sehat_saathi_api_structs::{dtos::PatientCareDTO, get_patients::*};
use sehat_saathi_domain::{Caregiver, User};
use sehat_saathi_infra::SehatContext;

pub async fn get_patients_controller(
    http_req: HttpRequest,
    ctx: web::Data<SehatContext>,
) -> Result<HttpResponse, SehatError> {
    let user = protect_route(&http_req, &ctx).await?;

    let usecase = GetPatientsUseCase { caregiver: user };

    execute(usecase, &ctx)
        .await
        .map(|records| {
            HttpResponse::Ok().json(APIResponse::new(
                records
                    .into_iter()
                    .map(|(record, patient)| PatientCareDTO::new(record, patient))
                    .collect(),
            ))
        })
        .map_err(|_| SehatError::InternalError)
}

/// Lists the caregiver records of the patients the user cares for
#[derive(Debug)]
pub struct GetPatientsUseCase {
    pub caregiver: User,
}

#[derive(Debug)]
pub enum UseCaseError {
    StorageError,
}

#[async_trait::async_trait(?Send)]
impl UseCase for GetPatientsUseCase {
    type Response = Vec<(Caregiver, Option<User>)>;

    type Error = UseCaseError;

    const NAME: &'static str = "GetPatients";

    async fn execute(&mut self, ctx: &SehatContext) -> Result<Self::Response, Self::Error> {
        let records = ctx
            .repos
            .caregivers
            .find_by_caregiver(&self.caregiver.id, &self.caregiver.email)
            .await
            .map_err(|_| UseCaseError::StorageError)?;

        let mut res = Vec::with_capacity(records.len());
        for record in records {
            let patient = ctx.repos.users.find(&record.patient_id).await;
            res.push((record, patient));
        }
        Ok(res)
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::caregiver::test_helpers::caregiver_factory;
    use sehat_saathi_domain::CaregiverStatus;

    #[actix_web::main]
    #[test]
    async fn lists_patients_by_id_or_email() {
        let ctx = SehatContext::create_inmemory();
        let caregiver = User::new("Ravi", "ravi@example.com");
        let mother = User::new("Asha", "asha@example.com");
        ctx.repos.users.insert(&mother).await.unwrap();
        let father_id = sehat_saathi_domain::ID::new();

        let by_id = caregiver_factory(
            &mother.id,
            "ravi.work@example.com",
            Some(caregiver.id.clone()),
            CaregiverStatus::Active,
        );
        let by_email =
            caregiver_factory(&father_id, "ravi@example.com", None, CaregiverStatus::Pending);
        ctx.repos.caregivers.insert(&by_id).await.unwrap();
        ctx.repos.caregivers.insert(&by_email).await.unwrap();

        let mut usecase = GetPatientsUseCase { caregiver };
        let res = usecase.execute(&ctx).await.unwrap();
        assert_eq!(res.len(), 2);
        let mother_record = res.iter().find(|(r, _)| r.id == by_id.id).unwrap();
        assert_eq!(mother_record.1.as_ref().map(|u| u.id.clone()), Some(mother.id));
        let father_record = res.iter().find(|(r, _)| r.id == by_email.id).unwrap();
        assert!(father_record.1.is_none());
    }
}
