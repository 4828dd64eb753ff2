use std::collections::BTreeMap;
use std::sync::{Arc, Mutex};

use super::{AppointmentGateway, AuthGateway, GatewayError};
use crate::accounts::domain::{
    LoginRequest, LoginResponse, RegisterRequest, RegisterResponse, Role, User, UserId,
};
use crate::appointments::domain::{
    Appointment, AppointmentId, AppointmentStatus, CreateAppointmentRequest, Page,
};

/// Process-local stand-in for the booking API, used by the demo server and tests.
#[derive(Default, Clone)]
pub struct InMemoryBackend {
    state: Arc<Mutex<BackendState>>,
}

#[derive(Default)]
struct BackendState {
    users: BTreeMap<UserId, StoredUser>,
    appointments: BTreeMap<AppointmentId, Appointment>,
    last_user_id: u64,
    last_appointment_id: u64,
    issued_tokens: u64,
    offline: bool,
}

struct StoredUser {
    user: User,
    password: String,
}

impl BackendState {
    fn ensure_online(&self) -> Result<(), GatewayError> {
        if self.offline {
            Err(GatewayError::Network("connection refused".to_string()))
        } else {
            Ok(())
        }
    }

    fn find_by_email(&self, email: &str) -> Option<&StoredUser> {
        self.users
            .values()
            .find(|stored| stored.user.email.eq_ignore_ascii_case(email.trim()))
    }

    fn user_with_role(&self, id: UserId, role: Role) -> Option<&User> {
        self.users
            .get(&id)
            .map(|stored| &stored.user)
            .filter(|user| user.role == role)
    }

    fn insert_user(&mut self, name: &str, email: &str, password: &str, role: Role) -> User {
        self.last_user_id += 1;
        let user = User {
            id: UserId(self.last_user_id),
            name: name.trim().to_string(),
            email: email.trim().to_string(),
            role,
        };
        self.users.insert(
            user.id,
            StoredUser {
                user: user.clone(),
                password: password.to_string(),
            },
        );
        user
    }

    fn appointments_where(&self, keep: impl Fn(&Appointment) -> bool) -> Vec<Appointment> {
        let mut matching: Vec<Appointment> = self
            .appointments
            .values()
            .filter(|appointment| keep(*appointment))
            .cloned()
            .collect();
        matching.sort_by_key(|appointment| (appointment.date_time, appointment.id));
        matching
    }
}

impl InMemoryBackend {
    pub fn new() -> Self {
        Self::default()
    }

    /// Backend pre-loaded with two doctors, handy for demos.
    pub fn with_sample_doctors() -> Self {
        let backend = Self::new();
        backend.seed_user("Juan García", "doctor1@test.com", "doctor123", Role::Doctor);
        backend.seed_user("María López", "doctor2@test.com", "doctor123", Role::Doctor);
        backend
    }

    pub fn seed_user(&self, name: &str, email: &str, password: &str, role: Role) -> User {
        let mut state = self.state.lock().expect("backend mutex poisoned");
        state.insert_user(name, email, password, role)
    }

    /// Simulate losing connectivity; every call fails with [`GatewayError::Network`].
    pub fn set_offline(&self, offline: bool) {
        self.state.lock().expect("backend mutex poisoned").offline = offline;
    }

    pub fn appointment(&self, id: AppointmentId) -> Option<Appointment> {
        let state = self.state.lock().expect("backend mutex poisoned");
        state.appointments.get(&id).cloned()
    }
}

impl AuthGateway for InMemoryBackend {
    fn login(&self, request: &LoginRequest) -> Result<LoginResponse, GatewayError> {
        let mut state = self.state.lock().expect("backend mutex poisoned");
        state.ensure_online()?;

        let user = match state.find_by_email(&request.email) {
            None => return Err(GatewayError::rejected(404, "user not found")),
            Some(stored) if stored.password != request.password => {
                return Err(GatewayError::rejected(401, "invalid credentials"))
            }
            Some(stored) => stored.user.clone(),
        };

        state.issued_tokens += 1;
        let token = format!("session-{}-{}", user.id, state.issued_tokens);

        Ok(LoginResponse {
            id: user.id,
            name: user.name,
            email: user.email,
            role: user.role,
            token,
        })
    }

    fn register(&self, request: &RegisterRequest) -> Result<RegisterResponse, GatewayError> {
        let mut state = self.state.lock().expect("backend mutex poisoned");
        state.ensure_online()?;

        if state.find_by_email(&request.email).is_some() {
            return Err(GatewayError::rejected(409, "email already registered"));
        }

        let user = state.insert_user(
            &request.name,
            &request.email,
            &request.password,
            request.role,
        );

        Ok(RegisterResponse {
            id: user.id,
            email: user.email,
            role: user.role,
        })
    }
}

impl AppointmentGateway for InMemoryBackend {
    fn patient_appointments(&self, patient_id: UserId) -> Result<Vec<Appointment>, GatewayError> {
        let state = self.state.lock().expect("backend mutex poisoned");
        state.ensure_online()?;
        Ok(state.appointments_where(|appointment| {
            appointment.patient.as_ref().map(|patient| patient.id) == Some(patient_id)
        }))
    }

    fn doctor_appointments(&self, doctor_id: UserId) -> Result<Vec<Appointment>, GatewayError> {
        let state = self.state.lock().expect("backend mutex poisoned");
        state.ensure_online()?;
        Ok(state.appointments_where(|appointment| {
            appointment.doctor.as_ref().map(|doctor| doctor.id) == Some(doctor_id)
        }))
    }

    fn patient_appointments_page(
        &self,
        patient_id: UserId,
        page: u32,
        size: u32,
    ) -> Result<Page<Appointment>, GatewayError> {
        if size == 0 {
            return Err(GatewayError::rejected(400, "page size must be positive"));
        }
        let appointments = self.patient_appointments(patient_id)?;
        Ok(Page::slice(&appointments, page, size))
    }

    fn create_appointment(
        &self,
        request: &CreateAppointmentRequest,
    ) -> Result<Appointment, GatewayError> {
        let mut state = self.state.lock().expect("backend mutex poisoned");
        state.ensure_online()?;

        let doctor = state
            .user_with_role(request.doctor_id, Role::Doctor)
            .cloned()
            .ok_or_else(|| GatewayError::rejected(404, "doctor not found"))?;
        let patient = state
            .user_with_role(request.patient_id, Role::Patient)
            .cloned()
            .ok_or_else(|| GatewayError::rejected(404, "patient not found"))?;

        state.last_appointment_id += 1;
        let appointment = Appointment {
            id: AppointmentId(state.last_appointment_id),
            date_time: request.date_time,
            status: AppointmentStatus::Active,
            patient_name: Some(patient.name.clone()),
            doctor_name: Some(doctor.name.clone()),
            patient: Some(patient),
            doctor: Some(doctor),
        };
        state
            .appointments
            .insert(appointment.id, appointment.clone());

        Ok(appointment)
    }

    fn cancel_appointment(&self, appointment_id: AppointmentId) -> Result<(), GatewayError> {
        let mut state = self.state.lock().expect("backend mutex poisoned");
        state.ensure_online()?;

        let appointment = state
            .appointments
            .get_mut(&appointment_id)
            .ok_or_else(|| GatewayError::rejected(404, "appointment not found"))?;

        if appointment.status == AppointmentStatus::Canceled {
            return Err(GatewayError::rejected(409, "appointment already canceled"));
        }
        appointment.status = AppointmentStatus::Canceled;
        Ok(())
    }

    fn doctors(&self) -> Result<Vec<User>, GatewayError> {
        let state = self.state.lock().expect("backend mutex poisoned");
        state.ensure_online()?;
        Ok(state
            .users
            .values()
            .filter(|stored| stored.user.role == Role::Doctor)
            .map(|stored| stored.user.clone())
            .collect())
    }
}
