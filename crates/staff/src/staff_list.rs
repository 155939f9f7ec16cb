use std::sync::Arc;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use bizdoc_admin::User;
use bizdoc_core::{
    Bean, Bindable, ChangeTracker, Conditional, CreationError, Document, DocumentFactory,
    DomainError, DomainResult, FieldDescriptor, FieldKind, FieldValue, Geometry, Instantiate,
    Shared, UserContext, domain_enum, identity_eq, resolve_through, typed_only,
};

pub const USER: &str = "user";
pub const SOCIAL_TITLE: &str = "socialTitle";
pub const DATE_OF_BIRTH: &str = "dateOfBirth";
pub const ISSUED_DATE: &str = "issuedDate";
pub const EXPIRED_DATE: &str = "expiredDate";
pub const STAFF_ID: &str = "staffId";
pub const DEPT: &str = "dept";
pub const BU: &str = "bu";
pub const JOB_TITLE: &str = "jobTitle";
pub const START_DATE: &str = "startDate";
pub const BIO: &str = "bio";
pub const STAFF_LOCATION: &str = "staffLocation";

pub const STAFF_MANAGER: &str = "staffManager";
pub const NOT_STAFF_MANAGER: &str = "notStaffManager";

/// Role that grants management of staff records.
pub const STAFF_MANAGER_ROLE: &str = "StaffManager";

static FIELDS: &[FieldDescriptor] = &[
    FieldDescriptor::new(USER, FieldKind::Reference),
    FieldDescriptor::new(SOCIAL_TITLE, FieldKind::Enum),
    FieldDescriptor::new(DATE_OF_BIRTH, FieldKind::Date),
    FieldDescriptor::new(ISSUED_DATE, FieldKind::Date),
    FieldDescriptor::new(EXPIRED_DATE, FieldKind::Date),
    FieldDescriptor::new(STAFF_ID, FieldKind::Text),
    FieldDescriptor::new(DEPT, FieldKind::Text),
    FieldDescriptor::new(BU, FieldKind::Text),
    FieldDescriptor::new(JOB_TITLE, FieldKind::Text),
    FieldDescriptor::new(START_DATE, FieldKind::Date),
    FieldDescriptor::new(BIO, FieldKind::Text),
    FieldDescriptor::new(STAFF_LOCATION, FieldKind::Geometry),
];

domain_enum! {
    pub enum SocialTitle {
        Mr => ("mr", "Mr"),
        Ms => ("ms", "Ms"),
        Mrs => ("mrs", "Mrs"),
        Dr => ("dr", "Dr"),
    }
}

/// A staff member's HR record (`staff.StaffList`).
///
/// The display key is the name on the linked user's contact, so a record
/// without a user (or a user without a contact) shows as `"Unknown"`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StaffList {
    #[serde(flatten)]
    bean: Bean,
    user: Option<Shared<User>>,
    social_title: Option<SocialTitle>,
    date_of_birth: Option<NaiveDate>,
    issued_date: Option<NaiveDate>,
    expired_date: Option<NaiveDate>,
    staff_id: Option<String>,
    dept: Option<String>,
    bu: Option<String>,
    job_title: Option<String>,
    start_date: Option<NaiveDate>,
    bio: Option<String>,
    staff_location: Option<Geometry>,
}

macro_rules! text_field {
    ($get:ident, $set:ident, $name:ident) => {
        pub fn $get(&self) -> Option<&str> {
            self.$get.as_deref()
        }

        pub fn $set(&mut self, $get: Option<String>) {
            self.preset($name, $get.clone());
            self.$get = $get;
        }
    };
}

macro_rules! date_field {
    ($get:ident, $set:ident, $name:ident) => {
        pub fn $get(&self) -> Option<NaiveDate> {
            self.$get
        }

        pub fn $set(&mut self, $get: Option<NaiveDate>) {
            self.preset($name, $get);
            self.$get = $get;
        }
    };
}

impl StaffList {
    pub fn new(tracker: Arc<dyn ChangeTracker>) -> Self {
        Self::instantiate(Bean::new(tracker))
    }

    pub fn new_instance(factory: &dyn DocumentFactory) -> Result<Self, CreationError> {
        bizdoc_core::new_instance(factory)
    }

    pub fn user(&self) -> Option<&Shared<User>> {
        self.user.as_ref()
    }

    pub fn set_user(&mut self, user: Option<Shared<User>>) {
        if !Shared::same(self.user.as_ref(), user.as_ref()) {
            self.preset(USER, user.as_ref());
            self.user = user;
        }
    }

    pub fn social_title(&self) -> Option<SocialTitle> {
        self.social_title
    }

    pub fn set_social_title(&mut self, social_title: Option<SocialTitle>) {
        self.preset(SOCIAL_TITLE, FieldValue::from_enum(social_title));
        self.social_title = social_title;
    }

    date_field!(date_of_birth, set_date_of_birth, DATE_OF_BIRTH);
    date_field!(issued_date, set_issued_date, ISSUED_DATE);
    date_field!(expired_date, set_expired_date, EXPIRED_DATE);
    date_field!(start_date, set_start_date, START_DATE);

    text_field!(staff_id, set_staff_id, STAFF_ID);
    text_field!(dept, set_dept, DEPT);
    text_field!(bu, set_bu, BU);
    text_field!(job_title, set_job_title, JOB_TITLE);
    text_field!(bio, set_bio, BIO);

    pub fn staff_location(&self) -> Option<&Geometry> {
        self.staff_location.as_ref()
    }

    pub fn set_staff_location(&mut self, staff_location: Option<Geometry>) {
        self.preset(STAFF_LOCATION, staff_location.clone());
        self.staff_location = staff_location;
    }

    /// The current user may manage staff records.
    pub fn is_staff_manager(&self, user: &dyn UserContext) -> bool {
        user.is_user_in_role(Self::MODULE_NAME, STAFF_MANAGER_ROLE)
    }

    pub fn is_not_staff_manager(&self, user: &dyn UserContext) -> bool {
        !self.is_staff_manager(user)
    }
}

identity_eq!(StaffList);

impl Conditional for StaffList {
    fn conditions() -> &'static [&'static str] {
        &[STAFF_MANAGER, NOT_STAFF_MANAGER]
    }

    fn condition(&self, name: &str, user: &dyn UserContext) -> Option<bool> {
        match name {
            STAFF_MANAGER => Some(self.is_staff_manager(user)),
            NOT_STAFF_MANAGER => Some(self.is_not_staff_manager(user)),
            _ => None,
        }
    }
}

impl Bindable for StaffList {
    fn binding(&self, name: &str) -> Option<FieldValue> {
        Some(match name {
            USER => self.user.as_ref().into(),
            SOCIAL_TITLE => FieldValue::from_enum(self.social_title),
            DATE_OF_BIRTH => self.date_of_birth.into(),
            ISSUED_DATE => self.issued_date.into(),
            EXPIRED_DATE => self.expired_date.into(),
            STAFF_ID => self.staff_id.clone().into(),
            DEPT => self.dept.clone().into(),
            BU => self.bu.clone().into(),
            JOB_TITLE => self.job_title.clone().into(),
            START_DATE => self.start_date.into(),
            BIO => self.bio.clone().into(),
            STAFF_LOCATION => self.staff_location.clone().into(),
            _ => return None,
        })
    }

    fn resolve_related(&self, field: &str, path: &str) -> Option<FieldValue> {
        match field {
            USER => resolve_through(self.user.as_ref(), path),
            _ => None,
        }
    }
}

impl Document for StaffList {
    const MODULE_NAME: &'static str = "staff";
    const DOCUMENT_NAME: &'static str = "StaffList";
    const BIZ_KEY_TEMPLATE: &'static str = "{user.contact.name}";

    fn fields() -> &'static [FieldDescriptor] {
        FIELDS
    }

    fn bean(&self) -> &Bean {
        &self.bean
    }

    fn set(&mut self, field: &str, value: FieldValue) -> DomainResult<()> {
        match field {
            USER => return Err(typed_only(&Self::key(), field)),
            SOCIAL_TITLE => self.set_social_title(value.into_enum(field)?),
            DATE_OF_BIRTH => self.set_date_of_birth(value.into_date(field)?),
            ISSUED_DATE => self.set_issued_date(value.into_date(field)?),
            EXPIRED_DATE => self.set_expired_date(value.into_date(field)?),
            STAFF_ID => self.set_staff_id(value.into_text(field)?),
            DEPT => self.set_dept(value.into_text(field)?),
            BU => self.set_bu(value.into_text(field)?),
            JOB_TITLE => self.set_job_title(value.into_text(field)?),
            START_DATE => self.set_start_date(value.into_date(field)?),
            BIO => self.set_bio(value.into_text(field)?),
            STAFF_LOCATION => self.set_staff_location(value.into_geometry(field)?),
            _ => return Err(DomainError::unknown_field(field)),
        }
        Ok(())
    }
}

impl Instantiate for StaffList {
    /// New records start out addressed as "Mr".
    fn instantiate(bean: Bean) -> Self {
        Self {
            bean,
            user: None,
            social_title: Some(SocialTitle::Mr),
            date_of_birth: None,
            issued_date: None,
            expired_date: None,
            staff_id: None,
            dept: None,
            bu: None,
            job_title: None,
            start_date: None,
            bio: None,
            staff_location: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use bizdoc_admin::{Contact, Role};
    use bizdoc_core::{Enumeration, IdentityTranslator};
    use bizdoc_events::InMemoryChangeTracker;
    use proptest::prelude::*;

    fn user_named(name: Option<&str>) -> Shared<User> {
        let tracker = Arc::new(InMemoryChangeTracker::new());
        let mut user = User::new(tracker.clone());
        if let Some(name) = name {
            let mut contact = Contact::new(tracker);
            contact.set_name(Some(name.to_string()));
            user.set_contact(Some(Shared::new(contact)));
        }
        Shared::new(user)
    }

    #[test]
    fn new_records_default_to_mr_without_notifying() {
        let tracker = Arc::new(InMemoryChangeTracker::new());
        let staff = StaffList::new(tracker.clone());
        assert_eq!(staff.social_title(), Some(SocialTitle::Mr));
        assert!(tracker.is_empty());
    }

    #[test]
    fn social_titles_use_lowercase_codes() {
        assert_eq!(SocialTitle::Mrs.code(), "mrs");
        assert_eq!(SocialTitle::Dr.label(&IdentityTranslator), "Dr");
        assert_eq!(
            SocialTitle::from_label("Ms", &IdentityTranslator),
            Some(SocialTitle::Ms)
        );
        assert_eq!(SocialTitle::from_code("Mr"), None);
    }

    #[test]
    fn display_key_follows_user_contact_name() {
        let mut staff = StaffList::new(Arc::new(InMemoryChangeTracker::new()));
        assert_eq!(staff.biz_key(), "Unknown");

        staff.set_user(Some(user_named(None)));
        assert_eq!(staff.biz_key(), "Unknown");

        staff.set_user(Some(user_named(Some("Grace Hopper"))));
        assert_eq!(staff.biz_key(), "Grace Hopper");
    }

    #[test]
    fn staff_manager_is_a_role_of_the_current_user() {
        let staff = StaffList::new(Arc::new(InMemoryChangeTracker::new()));
        let mut current = User::new(Arc::new(InMemoryChangeTracker::new()));
        assert!(staff.is_not_staff_manager(&current));

        current.grant_role(Role::new("sales", STAFF_MANAGER_ROLE));
        assert!(!staff.is_staff_manager(&current));

        current.grant_role(Role::new("staff", STAFF_MANAGER_ROLE));
        assert!(staff.is_staff_manager(&current));
        assert_eq!(staff.condition(NOT_STAFF_MANAGER, &current), Some(false));
        assert_eq!(staff.condition("uploadSelected", &current), None);
    }

    #[test]
    fn location_accepts_wkt_text() {
        let mut staff = StaffList::new(Arc::new(InMemoryChangeTracker::new()));
        staff
            .set(STAFF_LOCATION, FieldValue::from("POINT (151.2 -33.9)"))
            .unwrap();
        assert_eq!(
            staff.staff_location().map(Geometry::as_wkt),
            Some("POINT (151.2 -33.9)")
        );
        staff
            .set(STAFF_LOCATION, FieldValue::from("POINT Z (151.2 -33.9 10)"))
            .unwrap();
        assert_eq!(
            staff.staff_location().map(Geometry::as_wkt),
            Some("POINT Z (151.2 -33.9 10)")
        );
        for text in ["somewhere", "POINT (not a coordinate)"] {
            assert!(matches!(
                staff.set(STAFF_LOCATION, FieldValue::from(text)),
                Err(DomainError::Validation(_))
            ));
        }
    }

    #[test]
    fn dates_serialize_as_iso_strings() {
        let mut staff = StaffList::new(Arc::new(InMemoryChangeTracker::new()));
        staff.set_start_date(NaiveDate::from_ymd_opt(2021, 7, 1));
        staff.set_social_title(Some(SocialTitle::Dr));

        let json = serde_json::to_value(&staff).unwrap();
        assert_eq!(json["startDate"], "2021-07-01");
        assert_eq!(json["socialTitle"], "dr");

        let back: StaffList = serde_json::from_value(json).unwrap();
        assert_eq!(back.start_date(), staff.start_date());
        assert_eq!(back.social_title(), Some(SocialTitle::Dr));
    }

    proptest! {
        #[test]
        fn date_setters_track_through_generic_set(days in 0i64..40_000) {
            let tracker = Arc::new(InMemoryChangeTracker::new());
            let mut staff = StaffList::new(tracker.clone());
            let date = NaiveDate::from_ymd_opt(1930, 1, 1).unwrap() + chrono::Duration::days(days);

            staff.set(DATE_OF_BIRTH, FieldValue::Date(date)).unwrap();
            prop_assert_eq!(staff.date_of_birth(), Some(date));
            prop_assert_eq!(tracker.dirty_fields(staff.biz_id()), vec![DATE_OF_BIRTH]);
        }
    }
}
