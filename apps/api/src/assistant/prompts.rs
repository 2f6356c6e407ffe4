// Fixed reply text for the local responder.
// Anything that depends on the snapshot is assembled in formatter.rs.

/// Topics offered after a greeting.
pub const TOPIC_MENU: &str = "You can ask me about:\n\n\
    • Skills and technologies\n\
    • Work experience\n\
    • Projects\n\
    • Education\n\
    • Contact information\n\n\
    What would you like to know?";

/// Answer for help requests and for anything no rule recognises.
pub const CAPABILITY_MENU: &str = "I can help you learn about:\n\n\
    • 💼 Work Experience\n\
    • 🚀 Projects\n\
    • 🛠️ Skills & Technologies\n\
    • 🎓 Education\n\
    • 📞 Contact Information\n\n\
    Just ask me anything specific!";

pub const SKILLS_LOADING: &str =
    "I'm still loading skills from the server. Please try again in a moment.";

pub const GENERIC_EXPERIENCE: &str = "I don't have detailed work history loaded right now, \
    but the work spans full-stack web development, REST API design, database modelling, \
    cloud deployment, and AI-assisted tooling. Ask again in a moment for specific roles.";

pub const GENERIC_PROJECTS: &str = "Here are a few kinds of projects you'll find in this portfolio:\n\n\
    1. Full-stack web applications with authentication and admin dashboards\n\
    2. Monitoring and developer tools for tracking service health\n\
    3. AI-powered assistants and productivity apps\n\n\
    Project details are still loading. Ask again in a moment for specifics!";

pub const GENERIC_EDUCATION: &str = "Education details aren't loaded yet. \
    The background is in computer science, with a focus on software engineering \
    and modern web technologies. Ask again in a moment for specifics.";

pub const GENERIC_BIO: &str =
    "A software developer who builds full-stack web applications and AI-powered tools.";

pub const AVAILABILITY: &str = "Feel free to reach out for collaborations or opportunities!";

pub const CONTACT_UNAVAILABLE: &str = "Contact details haven't loaded yet.";

/// Used when the remote AI answers successfully but without any text.
pub const EMPTY_REMOTE_ANSWER: &str = "I'm not sure how to answer that yet. \
    Try asking about skills, experience, projects, education, or contact details.";
