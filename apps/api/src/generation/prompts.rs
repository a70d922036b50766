// Prompt text for the generation and chat flows.
// Every builder here is a pure function of its arguments: no clock, no randomness.

use crate::llm_client::prompts::OUTPUT_CONTRACT;
use crate::models::chat::ChatMessage;

/// Stands in for the existing resume when the user has not provided one.
pub const NO_EXISTING_RESUME: &str = "No existing resume content provided - create a complete professional resume based on the job description.";

/// Label for the existing resume block in the generation instruction.
pub const EXISTING_RESUME_LABEL: &str = "Existing Resume Content:";

/// Opening role statement of the generation instruction.
pub const GENERATION_INTRO: &str = r#"You are an expert resume writer specializing in LaTeX resume creation. Your task is to generate a tailored resume in LaTeX format based on a job description and optionally the user's existing resume content."#;

/// Drafting guidance and the LaTeX template the model must follow.
pub const GENERATION_GUIDANCE: &str = r#"ANALYSIS GUIDELINES:
- If the existing resume is inadequate, blank, or has insufficient information, create a complete professional resume
- Identify gaps in skills, experience, projects, and achievements
- Suggest specific improvements for each section
- Add relevant projects and achievements that match the job requirements
- Provide actionable suggestions for enhancement
- If the uploaded resume is minimal or lacks detail, enhance it with realistic but impressive content
- Add missing sections like projects, achievements, or skills that are relevant to the job
- Provide specific, actionable feedback on what was improved and why

SKILLS ANALYSIS:
- Analyze the job description for required technical skills, programming languages, tools, and frameworks
- Compare with the provided resume's skills section
- Add missing skills that are relevant to the job description
- Ensure skills are categorized properly (Technical, Programming, Tools, Soft Skills)
- Include both hard skills and soft skills mentioned in the job requirements

PROJECTS ANALYSIS:
- Count the number of projects in the provided resume
- If projects are less than 2-3, add relevant sample projects that demonstrate the required skills
- Projects should showcase the technical skills mentioned in the job description
- Include projects with live links, GitHub repositories, and quantifiable outcomes
- Projects should demonstrate problem-solving, technical implementation, and real-world application

LaTeX Resume Requirements:
- Use the exact template structure provided
- Include comprehensive sections: Summary, Education, Skills, Experience, Projects
- Add relevant projects and achievements if missing
- Ensure all sections are complete and professional
- Use quantifiable achievements and action verbs
- Include ATS-friendly keywords from the job description

Use this exact LaTeX template structure:
\documentclass{resume}
\usepackage[left=0.4 in,top=0.4in,right=0.4 in,bottom=0.4in]{geometry}
\newcommand{\tab}[1]{\hspace{.2667\textwidth}\rlap{#1}} 
\newcommand{\itab}[1]{\hspace{0em}\rlap{#1}}

\name{[Professional Name]}
\address{[Phone Number] \\ [City, State/Country]}
\address{\href{mailto:[email]}{[email]} \\ \href{https://linkedin.com/in/[profile]}{LinkedIn} \\ \href{[portfolio-url]}{Portfolio}}

\begin{document}

\begin{rSection}{SUMMARY}
[2-3 sentence professional summary tailored to the specific job requirements]
\end{rSection}

\begin{rSection}{EDUCATION}
{\bf [Degree Name]}, [University Name] \hfill {[Graduation Year]}\\
[Major/Field of Study] \\

\end{rSection}

\begin{rSection}{SKILLS}
\begin{tabular}{ @{} >{\bfseries}l @{\hspace{6ex}} l }
Technical Skills & [Relevant technical skills from job description]\\
Programming & [Programming languages and frameworks]\\
Tools & [Development tools, software, platforms]\\
Soft Skills & [Leadership, communication, problem-solving]
\end{tabular}
\end{rSection}

\begin{rSection}{EXPERIENCE}
{\bf [Job Title]} \hfill [Start Date - End Date]\\
[Company Name] \hfill [Location] \\
\begin{itemize}
    \itemsep -3pt {} 
    \item [Achievement-focused bullet point with quantifiable results]
    \item [Another achievement with specific metrics]
    \item [Third achievement relevant to the job]
\end{itemize}

{\bf [Previous Job Title]} \hfill [Start Date - End Date]\\
[Previous Company] \hfill [Location] \\
\begin{itemize}
    \itemsep -3pt {} 
    \item [Relevant achievement]
    \item [Another relevant achievement]
\end{itemize}
\end{rSection}

\begin{rSection}{PROJECTS}
\vspace{-1.25em}
\item \textbf{[Project Name].} {[Project description with technologies used and outcomes achieved. Include live links if available.]}
\end{rSection}

\end{document}

CRITICAL GUIDELINES:
1. Analyze the job description thoroughly and extract key requirements, skills, and responsibilities
2. If existing resume is inadequate, create a complete professional resume with realistic but impressive content
3. Add missing projects, achievements, and skills that align with the job requirements
4. Use action verbs and quantifiable achievements (%, $, numbers)
5. Include relevant keywords from the job description for ATS optimization
6. Ensure all LaTeX syntax is correct and the document will compile
7. Focus on achievements and results rather than just responsibilities
8. Keep bullet points concise but impactful
9. Provide specific, actionable improvement suggestions
10. If the uploaded resume lacks detail, enhance it with comprehensive content
11. Add relevant projects and achievements that demonstrate the required skills
12. Ensure the resume is competitive and showcases the candidate's potential

SKILLS ENHANCEMENT:
- Extract all technical skills, programming languages, frameworks, and tools from the job description
- Compare with the provided resume's skills section
- Add any missing skills that are relevant to the job
- Ensure skills are properly categorized and comprehensive
- Include both technical and soft skills mentioned in the job requirements

PROJECTS ENHANCEMENT:
- Count existing projects in the provided resume
- If projects are less than 2-3, add relevant sample projects
- Projects should demonstrate the technical skills from the job description
- Include projects with:
  * Clear problem statements and solutions
  * Technologies used (matching job requirements)
  * Quantifiable outcomes and metrics
  * Live links or GitHub repositories
  * Real-world application and impact
- Projects should showcase problem-solving, technical implementation, and innovation"#;

/// Layout requested for the improvements segment.
pub const IMPROVEMENTS_FORMAT: &str = r#"IMPROVEMENTS ANALYSIS FORMAT:
In the improvements section, provide detailed analysis in this format:

SKILLS ANALYSIS:
- List all skills found in the job description
- Compare with the provided resume's skills
- Identify missing skills that should be added
- Suggest specific skills to include

PROJECTS ANALYSIS:
- Count the number of projects in the provided resume
- If projects are less than 2-3, explain why more projects are needed
- Suggest specific project types that would demonstrate the required skills
- Provide project ideas that showcase the job requirements

EXPERIENCE ENHANCEMENTS:
- Identify gaps in work experience descriptions
- Suggest improvements to make achievements more quantifiable
- Recommend action verbs and metrics to include

OTHER IMPROVEMENTS:
- Any additional suggestions for resume enhancement
- ATS optimization recommendations
- Format and presentation improvements

Generate the response in the exact format specified above."#;

/// Closing instructions of the job-tailored chat prompt.
pub const JOB_PROMPT_GUIDANCE: &str = r#"Please create a professional resume that:
1. Highlights relevant skills and experiences that match this job description
2. Uses keywords from the job posting to optimize for ATS systems
3. Tailors the summary and experience sections to align with the company's needs
4. Includes a compelling cover letter section
5. Formats the resume in a clean, professional structure

Please provide the resume in a structured format with clear sections."#;

/// A job posting for the one-shot tailored-resume chat prompt.
#[derive(Debug, Clone, serde::Deserialize)]
pub struct JobPosting {
    pub title: String,
    pub company: String,
    pub description: String,
    #[serde(default)]
    pub requirements: Option<String>,
}

/// Leading synthetic turn carrying the configured system prompt.
///
/// Sent as a `user` turn: the message-style backend rejects system turns inside
/// `messages`. Blank prompts produce no turn.
fn system_turn(system_prompt: &str) -> Option<ChatMessage> {
    (!system_prompt.trim().is_empty()).then(|| ChatMessage::user(system_prompt))
}

fn present(text: Option<&str>) -> Option<&str> {
    text.filter(|t| !t.trim().is_empty())
}

/// Content of the newest user turn, prefixed with the extracted resume when one is attached.
pub fn build_user_turn(utterance: &str, document: Option<&str>) -> String {
    match present(document) {
        Some(document) => format!("Resume Content:\n{document}\n\nUser Question: {utterance}"),
        None => utterance.to_string(),
    }
}

/// Conversational request: system turn, prior history, then the new utterance.
pub fn build_chat_messages(
    system_prompt: &str,
    history: &[ChatMessage],
    utterance: &str,
    document: Option<&str>,
) -> Vec<ChatMessage> {
    system_turn(system_prompt)
        .into_iter()
        .chain(history.iter().cloned())
        .chain(std::iter::once(ChatMessage::user(build_user_turn(
            utterance, document,
        ))))
        .collect()
}

/// The single instruction turn for tailored resume generation.
pub fn build_generation_prompt(job_description: &str, existing_document: Option<&str>) -> String {
    let existing = match present(existing_document) {
        Some(document) => format!("{EXISTING_RESUME_LABEL}\n{document}"),
        None => NO_EXISTING_RESUME.to_string(),
    };

    format!(
        "{GENERATION_INTRO}\n\n{OUTPUT_CONTRACT}\n\n{GENERATION_GUIDANCE}\n\n\
         Job Description: {job_description}\n\n{existing}\n\n{IMPROVEMENTS_FORMAT}"
    )
}

/// Generation request: system turn followed by the instruction turn.
pub fn build_generation_messages(
    system_prompt: &str,
    job_description: &str,
    existing_document: Option<&str>,
) -> Vec<ChatMessage> {
    system_turn(system_prompt)
        .into_iter()
        .chain(std::iter::once(ChatMessage::user(build_generation_prompt(
            job_description,
            existing_document,
        ))))
        .collect()
}

/// Job-tailored request: sent like a fresh chat, so the system turn leads.
pub fn build_job_messages(system_prompt: &str, job: &JobPosting) -> Vec<ChatMessage> {
    build_chat_messages(system_prompt, &[], &build_job_prompt(job), None)
}

/// Free-form tailored resume request for a single job posting.
pub fn build_job_prompt(job: &JobPosting) -> String {
    let requirements = match present(job.requirements.as_deref()) {
        Some(requirements) => format!("Requirements:\n{requirements}"),
        None => String::new(),
    };

    format!(
        "Generate a customized resume for the following job:\n\n\
         Job Title: {}\nCompany: {}\n\nJob Description:\n{}\n\n{requirements}\n\n{JOB_PROMPT_GUIDANCE}",
        job.title, job.company, job.description
    )
}
