//! 表单校验模块
//!
//! `Form<F>` 持有字段值与 touched 集合，负责：
//! - 按字段规则校验（长度按字符计数）
//! - 只对 touched 字段展示错误
//! - 提交时标记全部字段并阻止无效提交
//! - 表单数据到请求对象的转换

use crate::{
    CreateUserRequest, DEFAULT_PRIORITY, LoginRequest, Role, Task, TaskAssignmentRequest,
    TaskDraft, TaskStatus, UpdateUserRequest, User,
};
use std::collections::{HashMap, HashSet};
use std::fmt;
use std::hash::Hash;

// =========================================================
// 规则与错误 (Rules & Errors)
// =========================================================

/// 除 Required 外，空值一律跳过其余规则
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Rule {
    Required,
    MinLen(usize),
    MaxLen(usize),
    Min(i64),
    Email,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    Required { label: &'static str },
    TooShort { label: &'static str, min: usize },
    TooLong { label: &'static str, max: usize },
    TooSmall { label: &'static str, min: i64 },
    InvalidEmail,
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ValidationError::Required { label } => write!(f, "{label} alanı zorunludur."),
            ValidationError::TooShort { label, min } => {
                write!(f, "{label} en az {min} karakter olmalıdır.")
            }
            ValidationError::TooLong { label, max } => {
                write!(f, "{label} en fazla {max} karakter olabilir.")
            }
            ValidationError::TooSmall { label, min } => {
                write!(f, "{label} {min}'den büyük olmalıdır.")
            }
            ValidationError::InvalidEmail => f.write_str("Geçerli bir e-posta adresi giriniz."),
        }
    }
}

const LOCAL_SPECIALS: &str = "!#$%&'*+/=?^_`{|}~-";

/// 与浏览器端常用的 email 规则一致：域名可以没有点（`a@b` 合法）
fn looks_like_email(value: &str) -> bool {
    let Some((local, domain)) = value.split_once('@') else {
        return false;
    };
    if value.len() > 254 || local.is_empty() || local.len() > 64 {
        return false;
    }

    let local_ok = local.split('.').all(|atom| {
        !atom.is_empty()
            && atom
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || LOCAL_SPECIALS.contains(c))
    });
    let domain_ok = domain.split('.').all(|label| {
        (1..=63).contains(&label.len())
            && !label.starts_with('-')
            && !label.ends_with('-')
            && label.chars().all(|c| c.is_ascii_alphanumeric() || c == '-')
    });
    local_ok && domain_ok
}

impl Rule {
    pub fn check(&self, label: &'static str, value: &str) -> Result<(), ValidationError> {
        let trimmed = value.trim();
        if trimmed.is_empty() {
            return match self {
                Rule::Required => Err(ValidationError::Required { label }),
                _ => Ok(()),
            };
        }
        match *self {
            Rule::Required => Ok(()),
            Rule::MinLen(min) if value.chars().count() < min => {
                Err(ValidationError::TooShort { label, min })
            }
            Rule::MaxLen(max) if value.chars().count() > max => {
                Err(ValidationError::TooLong { label, max })
            }
            Rule::Min(min) => match trimmed.parse::<i64>() {
                Ok(n) if n >= min => Ok(()),
                _ => Err(ValidationError::TooSmall { label, min }),
            },
            Rule::Email if !looks_like_email(trimmed) => Err(ValidationError::InvalidEmail),
            _ => Ok(()),
        }
    }
}

// =========================================================
// 表单 (Form)
// =========================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FormMode {
    #[default]
    Create,
    Edit,
}

pub trait FormField: Copy + Eq + Hash + fmt::Debug + 'static {
    const ALL: &'static [Self];

    fn label(&self) -> &'static str;

    fn rules(&self, form: &Form<Self>) -> Vec<Rule>;

    /// 字段可覆盖默认提示
    fn message(&self, error: &ValidationError) -> String {
        error.to_string()
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Form<F: FormField> {
    values: HashMap<F, String>,
    touched: HashSet<F>,
    mode: FormMode,
}

impl<F: FormField> Default for Form<F> {
    fn default() -> Self {
        Self::new(FormMode::Create)
    }
}

impl<F: FormField> Form<F> {
    pub fn new(mode: FormMode) -> Self {
        Self {
            values: HashMap::new(),
            touched: HashSet::new(),
            mode,
        }
    }

    pub fn mode(&self) -> FormMode {
        self.mode
    }

    pub fn get(&self, field: F) -> &str {
        self.values.get(&field).map(String::as_str).unwrap_or_default()
    }

    pub fn set(&mut self, field: F, value: impl Into<String>) {
        self.values.insert(field, value.into());
    }

    pub fn with(mut self, field: F, value: impl Into<String>) -> Self {
        self.set(field, value);
        self
    }

    pub fn touch(&mut self, field: F) {
        self.touched.insert(field);
    }

    pub fn is_touched(&self, field: F) -> bool {
        self.touched.contains(&field)
    }

    pub fn mark_all_touched(&mut self) {
        self.touched.extend(F::ALL.iter().copied());
    }

    /// 清空值与 touched，保留模式
    pub fn reset(&mut self) {
        self.values.clear();
        self.touched.clear();
    }

    /// 字段的第一条错误
    pub fn error(&self, field: F) -> Option<String> {
        let value = self.get(field);
        field
            .rules(self)
            .iter()
            .find_map(|rule| rule.check(field.label(), value).err())
            .map(|e| field.message(&e))
    }

    /// 仅当字段 touched 时返回错误
    pub fn visible_error(&self, field: F) -> Option<String> {
        if self.is_touched(field) {
            self.error(field)
        } else {
            None
        }
    }

    pub fn is_valid(&self) -> bool {
        F::ALL.iter().all(|f| self.error(*f).is_none())
    }

    /// 提交前调用：无效时标记全部字段并返回所有错误
    pub fn submit(&mut self) -> Result<(), Vec<(F, String)>> {
        let errors: Vec<(F, String)> = F::ALL
            .iter()
            .filter_map(|f| self.error(*f).map(|e| (*f, e)))
            .collect();
        if errors.is_empty() {
            Ok(())
        } else {
            self.mark_all_touched();
            Err(errors)
        }
    }

    fn number(&self, field: F) -> Option<i64> {
        self.get(field).trim().parse().ok()
    }

    fn text(&self, field: F) -> String {
        self.get(field).trim().to_string()
    }
}

// =========================================================
// 任务表单 (Task Form)
// =========================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TaskField {
    Name,
    Description,
    Assignee,
    Priority,
}

impl FormField for TaskField {
    const ALL: &'static [Self] = &[
        TaskField::Name,
        TaskField::Description,
        TaskField::Assignee,
        TaskField::Priority,
    ];

    fn label(&self) -> &'static str {
        match self {
            TaskField::Name => "Görev Adı",
            TaskField::Description => "Açıklama",
            TaskField::Assignee => "Kullanıcı ID",
            TaskField::Priority => "Öncelik",
        }
    }

    fn rules(&self, _form: &Form<Self>) -> Vec<Rule> {
        match self {
            TaskField::Name => vec![Rule::Required, Rule::MinLen(3), Rule::MaxLen(100)],
            TaskField::Description => vec![Rule::Required, Rule::MinLen(10), Rule::MaxLen(500)],
            TaskField::Assignee => vec![Rule::Required, Rule::Min(1)],
            TaskField::Priority => vec![Rule::Required],
        }
    }
}

impl Form<TaskField> {
    pub fn for_new_task() -> Self {
        Form::new(FormMode::Create).with(TaskField::Priority, DEFAULT_PRIORITY)
    }

    pub fn from_task(task: &Task) -> Self {
        Form::new(FormMode::Edit)
            .with(TaskField::Name, task.name.clone())
            .with(TaskField::Description, task.description.clone())
            .with(TaskField::Assignee, task.assignee_id.to_string())
            .with(TaskField::Priority, task.priority.clone())
    }

    pub fn to_draft(&self, status: TaskStatus) -> TaskDraft {
        TaskDraft {
            name: self.text(TaskField::Name),
            description: self.text(TaskField::Description),
            assignee_id: self.number(TaskField::Assignee).unwrap_or_default(),
            priority: self.text(TaskField::Priority),
            status,
            parent_task_id: None,
        }
    }
}

// =========================================================
// 登录表单 (Login Form)
// =========================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LoginField {
    UsernameOrEmail,
    Password,
}

impl FormField for LoginField {
    const ALL: &'static [Self] = &[LoginField::UsernameOrEmail, LoginField::Password];

    fn label(&self) -> &'static str {
        match self {
            LoginField::UsernameOrEmail => "Kullanıcı adı veya email",
            LoginField::Password => "Şifre",
        }
    }

    fn rules(&self, _form: &Form<Self>) -> Vec<Rule> {
        vec![Rule::Required, Rule::MinLen(3)]
    }

    fn message(&self, error: &ValidationError) -> String {
        let text = match (self, error) {
            (LoginField::UsernameOrEmail, ValidationError::Required { .. }) => {
                "Kullanıcı adı veya email gerekli!"
            }
            (LoginField::UsernameOrEmail, _) => "Kullanıcı adı en az 3 karakter olmalı!",
            (LoginField::Password, ValidationError::Required { .. }) => "Şifre gerekli!",
            (LoginField::Password, _) => "Şifre en az 3 karakter olmalı!",
        };
        text.to_string()
    }
}

impl Form<LoginField> {
    pub fn to_request(&self) -> LoginRequest {
        LoginRequest {
            username_or_email: self.text(LoginField::UsernameOrEmail),
            password: self.get(LoginField::Password).to_string(),
        }
    }
}

// =========================================================
// 用户表单 (User Form)
// =========================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum UserField {
    Username,
    Email,
    Password,
    FullName,
    Role,
    ManagerType,
    ManagerId,
}

impl FormField for UserField {
    const ALL: &'static [Self] = &[
        UserField::Username,
        UserField::Email,
        UserField::Password,
        UserField::FullName,
        UserField::Role,
        UserField::ManagerType,
        UserField::ManagerId,
    ];

    fn label(&self) -> &'static str {
        match self {
            UserField::Username => "Kullanıcı Adı",
            UserField::Email => "E-posta",
            UserField::Password => "Şifre",
            UserField::FullName => "Ad Soyad",
            UserField::Role => "Rol",
            UserField::ManagerType => "Müdür Tipi",
            UserField::ManagerId => "Bağlı Müdür",
        }
    }

    fn rules(&self, form: &Form<Self>) -> Vec<Rule> {
        let role = Role::parse(form.get(UserField::Role));
        match self {
            UserField::Username => vec![Rule::Required, Rule::MinLen(3)],
            UserField::Email => vec![Rule::Required, Rule::Email],
            UserField::Password => match form.mode() {
                FormMode::Create => vec![Rule::Required, Rule::MinLen(6)],
                FormMode::Edit => vec![Rule::MinLen(6)],
            },
            UserField::FullName | UserField::Role => vec![Rule::Required],
            UserField::ManagerType if role == Some(Role::Manager) => vec![Rule::Required],
            UserField::ManagerId if role == Some(Role::TeamMember) => vec![Rule::Required],
            UserField::ManagerType | UserField::ManagerId => Vec::new(),
        }
    }
}

impl Form<UserField> {
    pub fn from_user(user: &User) -> Self {
        Form::new(FormMode::Edit)
            .with(UserField::Username, user.username.clone())
            .with(UserField::Email, user.email.clone())
            .with(UserField::FullName, user.full_name.clone())
            .with(UserField::Role, user.role.as_str())
            .with(
                UserField::ManagerType,
                user.manager_type.clone().unwrap_or_default(),
            )
            .with(
                UserField::ManagerId,
                user.manager_id.map(|id| id.to_string()).unwrap_or_default(),
            )
    }

    pub fn role(&self) -> Option<Role> {
        Role::parse(self.get(UserField::Role))
    }

    /// 只保留与角色相关的附加字段
    fn role_extras(&self) -> (Option<String>, Option<i64>) {
        match self.role() {
            Some(Role::Manager) => (Some(self.text(UserField::ManagerType)), None),
            Some(Role::TeamMember) => (None, self.number(UserField::ManagerId)),
            _ => (None, None),
        }
    }

    pub fn to_create_request(&self) -> Option<CreateUserRequest> {
        let (manager_type, manager_id) = self.role_extras();
        Some(CreateUserRequest {
            username: self.text(UserField::Username),
            email: self.text(UserField::Email),
            password: self.get(UserField::Password).to_string(),
            full_name: self.text(UserField::FullName),
            role: self.role()?,
            manager_type,
            manager_id,
        })
    }

    pub fn to_update_request(&self, active: Option<bool>) -> Option<UpdateUserRequest> {
        let (manager_type, manager_id) = self.role_extras();
        let password = self.get(UserField::Password);
        Some(UpdateUserRequest {
            username: self.text(UserField::Username),
            email: self.text(UserField::Email),
            password: (!password.is_empty()).then(|| password.to_string()),
            full_name: self.text(UserField::FullName),
            role: self.role()?,
            active,
            manager_type,
            manager_id,
        })
    }
}

// =========================================================
// 经理分配表单 (Assign Form)
// =========================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AssignField {
    TeamMember,
    Name,
    Description,
    Priority,
    ParentTask,
}

impl FormField for AssignField {
    const ALL: &'static [Self] = &[
        AssignField::TeamMember,
        AssignField::Name,
        AssignField::Description,
        AssignField::Priority,
        AssignField::ParentTask,
    ];

    fn label(&self) -> &'static str {
        match self {
            AssignField::TeamMember => "Ekip Üyesi",
            AssignField::Name => "Görev Adı",
            AssignField::Description => "Açıklama",
            AssignField::Priority => "Öncelik",
            AssignField::ParentTask => "Üst Görev",
        }
    }

    fn rules(&self, _form: &Form<Self>) -> Vec<Rule> {
        match self {
            AssignField::TeamMember | AssignField::Priority => vec![Rule::Required],
            AssignField::Name => vec![Rule::Required, Rule::MinLen(3)],
            AssignField::Description => vec![Rule::Required, Rule::MinLen(10)],
            AssignField::ParentTask => Vec::new(),
        }
    }
}

impl Form<AssignField> {
    pub fn for_assignment() -> Self {
        Form::new(FormMode::Create).with(AssignField::Priority, DEFAULT_PRIORITY)
    }

    pub fn to_request(&self) -> TaskAssignmentRequest {
        TaskAssignmentRequest {
            name: self.text(AssignField::Name),
            description: self.text(AssignField::Description),
            assignee_id: self.number(AssignField::TeamMember).unwrap_or_default(),
            priority: self.text(AssignField::Priority),
            status: Some(TaskStatus::Pending),
            parent_task_id: self.number(AssignField::ParentTask),
        }
    }
}

// =========================================================
// 报告表单 (Report Form)
// =========================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ReportField {
    Description,
}

impl FormField for ReportField {
    const ALL: &'static [Self] = &[ReportField::Description];

    fn label(&self) -> &'static str {
        "Rapor Açıklaması"
    }

    fn rules(&self, _form: &Form<Self>) -> Vec<Rule> {
        vec![Rule::Required, Rule::MinLen(10)]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_short_task_name_shows_min_length_error() {
        let mut form = Form::for_new_task()
            .with(TaskField::Name, "ab")
            .with(TaskField::Description, "Yeterince uzun açıklama")
            .with(TaskField::Assignee, "4");

        assert_eq!(form.visible_error(TaskField::Name), None);
        assert!(form.submit().is_err());
        assert_eq!(
            form.visible_error(TaskField::Name).as_deref(),
            Some("Görev Adı en az 3 karakter olmalıdır.")
        );
        assert!(form.is_touched(TaskField::Priority));
    }

    #[test]
    fn test_task_form_limits() {
        let form = Form::for_new_task()
            .with(TaskField::Name, "x".repeat(101))
            .with(TaskField::Description, "kısa")
            .with(TaskField::Assignee, "0");
        assert_eq!(
            form.error(TaskField::Name).as_deref(),
            Some("Görev Adı en fazla 100 karakter olabilir.")
        );
        assert_eq!(
            form.error(TaskField::Description).as_deref(),
            Some("Açıklama en az 10 karakter olmalıdır.")
        );
        assert_eq!(
            form.error(TaskField::Assignee).as_deref(),
            Some("Kullanıcı ID 1'den büyük olmalıdır.")
        );
        assert_eq!(form.error(TaskField::Priority), None);
    }

    #[test]
    fn test_lengths_count_characters() {
        // "Işık" 4 karakter, 6 bayt
        assert!(Rule::MaxLen(4).check("Ad", "Işık").is_ok());
        assert!(Rule::MinLen(4).check("Ad", "Işık").is_ok());
    }

    #[test]
    fn test_valid_task_form_builds_draft() {
        let mut form = Form::for_new_task()
            .with(TaskField::Name, " Sunum ")
            .with(TaskField::Description, "Müşteri sunumunu hazırla")
            .with(TaskField::Assignee, "12");
        assert!(form.submit().is_ok());
        let draft = form.to_draft(TaskStatus::Pending);
        assert_eq!(draft.name, "Sunum");
        assert_eq!(draft.assignee_id, 12);
        assert_eq!(draft.priority, "orta");
    }

    #[test]
    fn test_login_messages() {
        let form = Form::<LoginField>::default().with(LoginField::Password, "ab");
        assert_eq!(
            form.error(LoginField::UsernameOrEmail).as_deref(),
            Some("Kullanıcı adı veya email gerekli!")
        );
        assert_eq!(
            form.error(LoginField::Password).as_deref(),
            Some("Şifre en az 3 karakter olmalı!")
        );
    }

    #[test]
    fn test_user_form_role_dependent_rules() {
        let base = Form::<UserField>::new(FormMode::Create)
            .with(UserField::Username, "ali")
            .with(UserField::Email, "ali@firma.com")
            .with(UserField::Password, "123456")
            .with(UserField::FullName, "Ali Veli");

        let member = base.clone().with(UserField::Role, "TEAM_MEMBER");
        assert!(member.error(UserField::ManagerId).is_some());
        assert!(member.error(UserField::ManagerType).is_none());

        let manager = base.clone().with(UserField::Role, "MANAGER");
        assert!(manager.error(UserField::ManagerType).is_some());

        let manager = manager.with(UserField::ManagerType, "Satış");
        assert!(manager.is_valid());
        let req = manager.to_create_request().unwrap();
        assert_eq!(req.manager_type.as_deref(), Some("Satış"));
        assert_eq!(req.manager_id, None);
    }

    #[test]
    fn test_user_edit_password_optional() {
        let user = User {
            id: 3,
            username: "zeynep".into(),
            email: "z@firma.com".into(),
            full_name: "Zeynep K".into(),
            role: Role::Director,
            active: Some(true),
            manager_type: None,
            manager_id: None,
        };
        let mut form = Form::from_user(&user);
        assert!(form.is_valid());
        assert_eq!(form.to_update_request(Some(true)).unwrap().password, None);

        form.set(UserField::Password, "123");
        assert!(form.error(UserField::Password).is_some());
    }

    #[test]
    fn test_email_rule() {
        assert!(Rule::Email.check("E-posta", "a@b.co").is_ok());
        assert!(Rule::Email.check("E-posta", "a@b").is_ok());
        assert!(Rule::Email.check("E-posta", "ali.veli+is@firma-x.com.tr").is_ok());
        assert_eq!(
            Rule::Email.check("E-posta", "a b@c.d"),
            Err(ValidationError::InvalidEmail)
        );
        assert!(Rule::Email.check("E-posta", "a@@b").is_err());
        assert!(Rule::Email.check("E-posta", "a@b.").is_err());
        assert!(Rule::Email.check("E-posta", ".a@b").is_err());
        assert!(Rule::Email.check("E-posta", "a@-b.com").is_err());
        assert!(Rule::Email.check("E-posta", "ayşe@firma.com").is_err());
    }

    #[test]
    fn test_assign_form_request() {
        let mut form = Form::for_assignment()
            .with(AssignField::TeamMember, "8")
            .with(AssignField::Name, "Test")
            .with(AssignField::Description, "Birim testleri yaz");
        assert!(form.submit().is_ok());
        let req = form.to_request();
        assert_eq!(req.assignee_id, 8);
        assert_eq!(req.parent_task_id, None);
        assert_eq!(req.status, Some(TaskStatus::Pending));
    }
}
