//! Emails sent to applicants when their status changes.

use sitehub_entity::application::ApplicationNotice;

const SIGNATURE: &str = "Best regards,\nHiring Team";

/// Subject and body of the email for `notice`.
pub fn notice_email(notice: ApplicationNotice, applicant: &str, position: &str) -> (String, String) {
    let (subject, paragraph) = match notice {
        ApplicationNotice::Shortlisted => (
            "Interview Scheduled - Next Steps",
            format!(
                "Congratulations! You have been shortlisted for the {position} position.\n\
                 Please check your email for further instructions regarding the interview schedule."
            ),
        ),
        ApplicationNotice::Rejected => (
            "Application Update - Rejected",
            format!(
                "Thank you for applying for the {position} position. Unfortunately, we have decided to proceed with other candidates.\n\
                 We appreciate your interest and encourage you to apply again in the future."
            ),
        ),
        ApplicationNotice::Hired => (
            "Welcome to the Team!",
            format!(
                "Congratulations! You have been selected for the {position} position.\n\
                 We look forward to working with you."
            ),
        ),
    };
    (
        subject.to_string(),
        format!("Dear {applicant},\n\n{paragraph}\n\n{SIGNATURE}"),
    )
}
